use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === STORE MESSAGES ===
            Message::DatabaseInitialized(path) => format!("Database initialized at {}", path),
            Message::UsingBoard(name) => format!("Board: {}", name),

            // === TASK MESSAGES ===
            Message::TaskCreated { id, title } => format!("Created task #{}: {}", id, title),
            Message::TaskMoved { id, status } => format!("Moved task #{} to {}", id, status),
            Message::TaskUpdated(id) => format!("Updated task #{}", id),
            Message::TaskPrioritySet { id, priority } => format!("Set priority of task #{} to {}", id, priority),
            Message::TaskSoftDeleted(id) => format!("Deleted task #{} (restore with: cainban restore {})", id, id),
            Message::TaskHardDeleted(id) => format!("Permanently deleted task #{} and its links", id),
            Message::TaskRestored(id) => format!("Restored task #{}", id),
            Message::ConfirmHardDelete(label) => format!("Permanently delete {}? This cannot be undone", label),
            Message::HardDeleteCancelled => "Delete cancelled.".to_string(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::NoTasksWithStatus(status) => format!("No tasks with status '{}'.", status),
            Message::SearchResultsHeader { query, count } => format!("Found {} task(s) matching '{}':", count, query),

            // === LINK MESSAGES ===
            Message::TasksLinked { from, to, link_type } => format!("Linked task #{} {} task #{}", from, link_type, to),
            Message::TasksUnlinked { from, to, link_type } => format!("Removed link: task #{} {} task #{}", from, link_type, to),
            Message::TaskLinksHeader(label) => format!("Links for {}:", label),
            Message::NoLinksForTask(id) => format!("Task #{} has no links.", id),

            // === BOARD MESSAGES ===
            Message::BoardCreated(name) => format!("Created board '{}'", name),
            Message::BoardSwitched(name) => format!("Switched to board '{}'", name),
            Message::BoardDeleted(name) => format!("Deleted board '{}'", name),
            Message::BoardNotFound(name) => format!("Board '{}' does not exist. Create it with: cainban board create {}", name, name),
            Message::CurrentBoard(name) => format!("Current board: {}", name),
            Message::DetectedBoard(name) => format!("Detected project board: {}", name),
            Message::ConfirmDeleteBoard(name) => format!("Delete board '{}' and all of its tasks?", name),
            Message::BoardDeleteCancelled => "Board deletion cancelled.".to_string(),
            Message::NoBoards => "No boards yet. Run `cainban init` to create the default board.".to_string(),

            // === CONFIG MESSAGES ===
            Message::ConfigValueSet { key, value } => format!("Set {} = {}", key, value),
            Message::ConfigHeader(path) => format!("Configuration ({}):", path),

            // === MIGRATION MESSAGES ===
            Message::MigrationStatus { current, latest } => format!("Database version: {} (latest: {})", current, latest),
            Message::MigrationsUpToDate => "Database is up to date.".to_string(),
            Message::MigrationsPending(count) => format!("{} migration(s) pending; they run automatically on next open.", count),
            Message::MigrationHistoryHeader => "Applied migrations:".to_string(),
            Message::NoMigrationsApplied => "No migrations have been applied.".to_string(),

            // === RPC MESSAGES ===
            Message::McpServerStarting(board) => format!("MCP server listening on stdio (board: {})", board),
        };

        write!(f, "{}", text)
    }
}
