use super::Workspace;
use crate::{
    db::tasks::Tasks,
    libs::{
        messages::Message,
        resolver::Resolver,
        task::{PriorityInput, Status, Task, DEFAULT_BOARD_ID},
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    title: String,
    /// Optional description (remaining words)
    description: Vec<String>,
    /// Priority: none, low, medium, high, critical or 0-4
    #[arg(short, long)]
    priority: Option<PriorityInput>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only tasks with this status (todo, doing, done)
    status: Option<String>,
}

#[derive(Debug, Args)]
pub struct TaskRefArgs {
    /// Task ID or part of its title
    task: String,
}

impl TaskRefArgs {
    pub fn task(&self) -> &str {
        &self.task
    }
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Task ID or part of its title
    task: String,
    /// New status (todo, doing, done)
    status: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Task ID or part of its title
    task: String,
    /// New title
    title: String,
    /// New description (remaining words)
    description: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PriorityArgs {
    /// Task ID or part of its title
    task: String,
    /// none, low, medium, high, critical or 0-4
    priority: PriorityInput,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID or part of its title
    task: String,
    /// Delete permanently, together with the task's links
    #[arg(long)]
    hard: bool,
    /// Skip the confirmation prompt for --hard
    #[arg(short, long)]
    yes: bool,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// ID of the deleted task
    id: i64,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Words to match against task titles
    #[arg(required = true)]
    query: Vec<String>,
}

pub fn add(workspace: &Workspace, args: AddArgs) -> Result<()> {
    let db = workspace.open()?;
    let priority = match args.priority {
        Some(priority) => priority,
        None => workspace.config.default_priority()?.into(),
    };

    let task = Tasks::new(&db).create_task(DEFAULT_BOARD_ID, &args.title, &args.description.join(" "), Some(priority))?;
    msg_success!(Message::TaskCreated {
        id: task.id,
        title: task.title,
    });
    Ok(())
}

pub fn list(workspace: &Workspace, args: ListArgs) -> Result<()> {
    let db = workspace.open()?;
    let tasks = Tasks::new(&db);

    let listed = match &args.status {
        Some(status) => tasks.list_tasks_by_status(DEFAULT_BOARD_ID, status.parse::<Status>()?)?,
        None => tasks.list_tasks(DEFAULT_BOARD_ID)?,
    };

    if listed.is_empty() {
        match args.status {
            Some(status) => msg_info!(Message::NoTasksWithStatus(status)),
            None => msg_info!(Message::NoTasksFound),
        }
        return Ok(());
    }

    View::tasks(&listed);
    Ok(())
}

pub fn view(workspace: &Workspace) -> Result<()> {
    let db = workspace.open()?;
    let tasks = Tasks::new(&db).list_tasks(DEFAULT_BOARD_ID)?;

    msg_print!(Message::UsingBoard(workspace.board.clone()));
    View::kanban(&tasks);
    Ok(())
}

pub fn get(workspace: &Workspace, args: TaskRefArgs) -> Result<()> {
    let db = workspace.open()?;
    let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;

    View::task(&task);
    Ok(())
}

pub fn move_task(workspace: &Workspace, args: MoveArgs) -> Result<()> {
    let status: Status = args.status.parse()?;
    let db = workspace.open()?;
    let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;

    Tasks::new(&db).update_task_status(task.id, status)?;
    msg_success!(Message::TaskMoved {
        id: task.id,
        status: status.to_string(),
    });
    Ok(())
}

pub fn update(workspace: &Workspace, args: UpdateArgs) -> Result<()> {
    let db = workspace.open()?;
    let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;

    Tasks::new(&db).update_task(task.id, &args.title, &args.description.join(" "))?;
    msg_success!(Message::TaskUpdated(task.id));
    Ok(())
}

pub fn priority(workspace: &Workspace, args: PriorityArgs) -> Result<()> {
    let db = workspace.open()?;
    let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;

    let priority = Tasks::new(&db).update_task_priority(task.id, &args.priority)?;
    msg_success!(Message::TaskPrioritySet {
        id: task.id,
        priority: priority.to_string(),
    });
    Ok(())
}

pub fn delete(workspace: &Workspace, args: DeleteArgs) -> Result<()> {
    let db = workspace.open()?;
    let tasks = Tasks::new(&db);

    if !args.hard {
        let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;
        tasks.soft_delete(task.id)?;
        msg_success!(Message::TaskSoftDeleted(task.id));
        return Ok(());
    }

    // A numeric id may name a task that is already soft-deleted.
    let (id, label) = match args.task.trim().parse::<i64>() {
        Ok(id) => (id, tasks.get_task(id).map(|t| t.label()).unwrap_or_else(|_| format!("task #{}", id))),
        Err(_) => {
            let task: Task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, &args.task)?;
            (task.id, task.label())
        }
    };

    if workspace.config.confirm_hard_delete && !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmHardDelete(label).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_warning!(Message::HardDeleteCancelled);
            return Ok(());
        }
    }

    tasks.hard_delete(id)?;
    msg_success!(Message::TaskHardDeleted(id));
    Ok(())
}

pub fn restore(workspace: &Workspace, args: RestoreArgs) -> Result<()> {
    let db = workspace.open()?;

    Tasks::new(&db).restore_task(args.id)?;
    msg_success!(Message::TaskRestored(args.id));
    Ok(())
}

pub fn search(workspace: &Workspace, args: SearchArgs) -> Result<()> {
    let db = workspace.open()?;
    let query = args.query.join(" ");
    let found = Tasks::new(&db).search_tasks(DEFAULT_BOARD_ID, &query)?;

    if found.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::SearchResultsHeader {
        query,
        count: found.len(),
    });
    View::tasks(&found);
    Ok(())
}
