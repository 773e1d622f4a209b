/// User-facing messages printed by the CLI.
///
/// Text lives in one place (`display.rs`); commands only pick the variant.
#[derive(Debug, Clone)]
pub enum Message {
    // === STORE MESSAGES ===
    DatabaseInitialized(String),
    UsingBoard(String),

    // === TASK MESSAGES ===
    TaskCreated { id: i64, title: String },
    TaskMoved { id: i64, status: String },
    TaskUpdated(i64),
    TaskPrioritySet { id: i64, priority: String },
    TaskSoftDeleted(i64),
    TaskHardDeleted(i64),
    TaskRestored(i64),
    ConfirmHardDelete(String),
    HardDeleteCancelled,
    NoTasksFound,
    NoTasksWithStatus(String),
    SearchResultsHeader { query: String, count: usize },

    // === LINK MESSAGES ===
    TasksLinked { from: i64, to: i64, link_type: String },
    TasksUnlinked { from: i64, to: i64, link_type: String },
    TaskLinksHeader(String),
    NoLinksForTask(i64),

    // === BOARD MESSAGES ===
    BoardCreated(String),
    BoardSwitched(String),
    BoardDeleted(String),
    BoardNotFound(String),
    CurrentBoard(String),
    DetectedBoard(String),
    ConfirmDeleteBoard(String),
    BoardDeleteCancelled,
    NoBoards,

    // === CONFIG MESSAGES ===
    ConfigValueSet { key: String, value: String },
    ConfigHeader(String),

    // === MIGRATION MESSAGES ===
    MigrationStatus { current: u32, latest: u32 },
    MigrationsUpToDate,
    MigrationsPending(u32),
    MigrationHistoryHeader,
    NoMigrationsApplied,

    // === RPC MESSAGES ===
    McpServerStarting(String),
}
