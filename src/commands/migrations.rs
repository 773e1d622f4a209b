use super::Workspace;
use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show the schema version of the board store
    Status,
    /// List applied migrations
    History,
}

pub fn cmd(workspace: &Workspace, args: MigrationsArgs) -> Result<()> {
    let path = workspace.registry.board_path(&workspace.board);
    if !path.exists() {
        msg_bail_anyhow!(Message::BoardNotFound(workspace.board.clone()));
    }

    // Opened without migrating so pending migrations stay visible.
    let db = Db::open_without_migrations(&path)?;
    let manager = MigrationManager::new();

    match args.command {
        MigrationsCommand::Status => {
            let current = get_db_version(&db.conn)?;
            msg_print!(Message::MigrationStatus {
                current,
                latest: manager.latest_version(),
            });
            if needs_migration(&db.conn)? {
                msg_info!(Message::MigrationsPending(manager.latest_version() - current));
            } else {
                msg_info!(Message::MigrationsUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = manager.get_migration_history(&db.conn)?;
            if history.is_empty() {
                msg_info!(Message::NoMigrationsApplied);
                return Ok(());
            }
            msg_print!(Message::MigrationHistoryHeader, true);
            View::migrations(&history);
        }
    }

    Ok(())
}
