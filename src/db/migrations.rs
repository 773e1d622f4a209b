//! Versioned schema migrations for board stores.
//!
//! Stores created by older releases lack columns and constraints that the
//! entity core relies on. Each migration is recorded in the `migrations`
//! table once applied, and each one also checks the live schema before
//! changing it, so re-running against an already current store is a no-op.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cainban::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("cainban.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), cainban::libs::error::TaskError>(())
//! ```

use crate::libs::error::{TaskError, TaskResult};
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of all migrations, applied in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Registers all known migrations in version order.
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: priority levels on tasks.
        // Early stores had no priority column; every existing task becomes "none".
        self.add_migration(1, "add_task_priority", |tx| {
            if !has_column(tx, "tasks", "priority")? {
                tx.execute("ALTER TABLE tasks ADD COLUMN priority INTEGER NOT NULL DEFAULT 0", [])?;
            }
            tx.execute("UPDATE tasks SET priority = 0 WHERE priority IS NULL", [])?;
            Ok(())
        });

        // Version 2: soft delete.
        self.add_migration(2, "add_soft_delete", |tx| {
            if !has_column(tx, "tasks", "deleted_at")? {
                tx.execute("ALTER TABLE tasks ADD COLUMN deleted_at TIMESTAMP", [])?;
            }
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_deleted_at ON tasks(deleted_at)", [])?;
            Ok(())
        });

        // Version 3: one row per (from, to, type) edge.
        // Older stores could hold duplicates; keep the earliest of each.
        self.add_migration(3, "add_link_uniqueness", |tx| {
            tx.execute(
                "DELETE FROM task_links WHERE id NOT IN (
                    SELECT MIN(id) FROM task_links GROUP BY from_task_id, to_task_id, link_type
                )",
                [],
            )?;
            tx.execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_task_links_unique
                 ON task_links(from_task_id, to_task_id, link_type)",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded version, all in one transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> TaskResult<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            tracing::debug!(version = current_version, "database is up to date");
            return Ok(());
        }

        tracing::info!(count = pending.len(), "applying pending migrations");
        let tx = conn.transaction()?;

        for migration in pending {
            tracing::info!(version = migration.version, name = migration.name, "running migration");

            (migration.up)(&tx).map_err(|source| {
                tracing::error!(version = migration.version, error = %source, "migration failed");
                TaskError::Migration {
                    version: migration.version,
                    name: migration.name,
                    source,
                }
            })?;

            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Highest applied version, 0 for a store that has never been migrated.
    fn get_current_version(&self, conn: &Connection) -> TaskResult<u32> {
        let has_table: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Ok(0);
        }

        let version: u32 = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| row.get(0))?;
        Ok(version)
    }

    /// Highest version this build knows about.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Whether `version` is recorded in the `migrations` table.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> TaskResult<bool> {
        if self.get_current_version(conn)? == 0 {
            return Ok(false);
        }
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Applied migrations as (version, name, applied_at), oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> TaskResult<Vec<(u32, String, String)>> {
        if self.get_current_version(conn)? == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `table` currently has a column called `column`.
pub fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Runs every pending migration on `conn`.
pub fn init_with_migrations(conn: &mut Connection) -> TaskResult<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Highest applied migration version, 0 for a fresh store.
pub fn get_db_version(conn: &Connection) -> TaskResult<u32> {
    MigrationManager::new().get_current_version(conn)
}

/// Whether `conn` is behind [`MigrationManager::latest_version`].
pub fn needs_migration(conn: &Connection) -> TaskResult<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
