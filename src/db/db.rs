//! Store handle for one board.
//!
//! ## Features
//!
//! - **Pragmas**: foreign keys, WAL journal and a busy timeout on every open
//! - **Schema**: base tables created idempotently, then migrated
//! - **In-memory stores** for callers that need no file

use super::migrations::MigrationManager;
use crate::libs::error::TaskResult;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the default board store.
pub const DB_FILE_NAME: &str = "cainban.db";

/// How long a writer waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS boards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'todo',
    priority INTEGER NOT NULL DEFAULT 0,
    deleted_at TIMESTAMP,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS task_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_task_id INTEGER NOT NULL,
    to_task_id INTEGER NOT NULL,
    link_type TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (from_task_id) REFERENCES tasks(id) ON DELETE CASCADE,
    FOREIGN KEY (to_task_id) REFERENCES tasks(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_tasks_board_id ON tasks(board_id);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_task_links_from ON task_links(from_task_id);
CREATE INDEX IF NOT EXISTS idx_task_links_to ON task_links(to_task_id);

INSERT OR IGNORE INTO boards (id, name, description)
VALUES (1, 'Default Board', 'Default kanban board');
";

/// Connection to one board store.
///
/// Every task and link operation borrows this handle; none of them holds a
/// lock across calls.
pub struct Db {
    /// Underlying SQLite connection.
    pub conn: Connection,
    path: Option<PathBuf>,
}

impl Db {
    /// Opens (creating if needed) the store at `path` and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> TaskResult<Db> {
        let mut db = Self::open_without_migrations(path)?;
        db.conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        db.initialize()?;
        db.migrate()?;
        Ok(db)
    }

    /// Opens an initialized, migrated store that lives only as long as the handle.
    pub fn open_in_memory() -> TaskResult<Db> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        let mut db = Db { conn, path: None };
        db.initialize()?;
        db.migrate()?;
        Ok(db)
    }

    /// Opens the store with referential integrity enabled but leaves the schema untouched.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> TaskResult<Db> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        tracing::debug!(path = %path.display(), "opened board store");

        Ok(Db {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates tables, indexes and the default board record. Safe to repeat.
    pub fn initialize(&self) -> TaskResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Applies pending schema migrations. Safe to repeat.
    pub fn migrate(&mut self) -> TaskResult<()> {
        MigrationManager::new().run_migrations(&mut self.conn)
    }

    /// Backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
