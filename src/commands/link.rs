use super::Workspace;
use crate::{
    db::links::Links,
    libs::{
        messages::Message,
        resolver::Resolver,
        task::{LinkType, DEFAULT_BOARD_ID},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Source task ID or part of its title
    from: String,
    /// Target task ID or part of its title
    to: String,
    /// blocks, blocked_by, related or depends_on
    #[arg(short = 't', long = "type", default_value = "blocks")]
    link_type: String,
}

pub fn link(workspace: &Workspace, args: LinkArgs) -> Result<()> {
    let link_type: LinkType = args.link_type.parse()?;
    let db = workspace.open()?;
    let resolver = Resolver::new(&db);
    let from = resolver.resolve(DEFAULT_BOARD_ID, &args.from)?;
    let to = resolver.resolve(DEFAULT_BOARD_ID, &args.to)?;

    Links::new(&db).link_tasks(from.id, to.id, link_type)?;
    msg_success!(Message::TasksLinked {
        from: from.id,
        to: to.id,
        link_type: link_type.to_string(),
    });
    Ok(())
}

pub fn unlink(workspace: &Workspace, args: LinkArgs) -> Result<()> {
    let link_type: LinkType = args.link_type.parse()?;
    let db = workspace.open()?;
    let resolver = Resolver::new(&db);
    let from = resolver.resolve(DEFAULT_BOARD_ID, &args.from)?;
    let to = resolver.resolve(DEFAULT_BOARD_ID, &args.to)?;

    Links::new(&db).unlink_tasks(from.id, to.id, link_type)?;
    msg_success!(Message::TasksUnlinked {
        from: from.id,
        to: to.id,
        link_type: link_type.to_string(),
    });
    Ok(())
}

pub fn links(workspace: &Workspace, args: super::task::TaskRefArgs) -> Result<()> {
    let db = workspace.open()?;
    let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, args.task())?;
    let links = Links::new(&db).get_task_links(task.id)?;

    if links.is_empty() {
        msg_info!(Message::NoLinksForTask(task.id));
        return Ok(());
    }

    msg_print!(Message::TaskLinksHeader(task.label()));
    View::links(task.id, &links);
    Ok(())
}
