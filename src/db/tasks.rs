//! Task storage for a board store.
//!
//! ## Features
//!
//! - **Lifecycle**: create, update fields, status and priority
//! - **Soft delete**: rows are hidden by `deleted_at` and can be restored
//! - **Hard delete**: removes the row and its links in one transaction
//! - **Search**: fuzzy title and description matching ranked by score

use crate::db::db::Db;
use crate::libs::error::{TaskError, TaskResult};
use crate::libs::resolver::match_score;
use crate::libs::task::{validate_title, Priority, PriorityInput, Status, Task};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_COLUMNS: &str = "id, board_id, title, COALESCE(description, ''), status, COALESCE(priority, 0), deleted_at, created_at, updated_at";

const INSERT_TASK: &str = "INSERT INTO tasks (board_id, title, description, status, priority, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const SELECT_BOARD_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM boards WHERE id = ?1)";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?2, updated_at = ?3 WHERE id = ?1 AND deleted_at IS NULL";
const UPDATE_FIELDS: &str = "UPDATE tasks SET title = ?2, description = ?3, updated_at = ?4 WHERE id = ?1 AND deleted_at IS NULL";
const UPDATE_PRIORITY: &str = "UPDATE tasks SET priority = ?2, updated_at = ?3 WHERE id = ?1 AND deleted_at IS NULL";
const SOFT_DELETE: &str = "UPDATE tasks SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL";
const RESTORE: &str = "UPDATE tasks SET deleted_at = NULL, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NOT NULL";
const DELETE_TASK_LINKS: &str = "DELETE FROM task_links WHERE from_task_id = ?1 OR to_task_id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Task operations over one board store.
///
/// Every read ignores soft-deleted rows. Every write except
/// [`Tasks::restore_task`] and [`Tasks::hard_delete`] requires the row to be
/// active.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    /// Borrows the connection of an opened store.
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Creates a task in `todo` with the given priority, `none` when omitted.
    pub fn create_task(&self, board_id: i64, title: &str, description: &str, priority: Option<PriorityInput>) -> TaskResult<Task> {
        let title = validate_title(title)?;
        let priority = match priority {
            Some(input) => input.resolve()?,
            None => Priority::None,
        };

        let board_exists: bool = self.conn.query_row(SELECT_BOARD_EXISTS, params![board_id], |row| row.get(0))?;
        if !board_exists {
            return Err(TaskError::not_found(format!("board {} not found", board_id)));
        }

        self.conn
            .execute(INSERT_TASK, params![board_id, title, description, Status::Todo, priority, Utc::now()])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, board_id, %priority, "created task");

        self.get_task(id)
    }

    /// Active task by id. Soft-deleted and missing ids are both `NotFound`.
    pub fn get_task(&self, id: i64) -> TaskResult<Task> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?1 AND deleted_at IS NULL", TASK_COLUMNS);
        self.conn
            .query_row(&sql, params![id], task_from_row)
            .optional()?
            .ok_or_else(|| TaskError::not_found(format!("task {} not found", id)))
    }

    /// Active tasks of a board, highest priority first, oldest first within a priority.
    pub fn list_tasks(&self, board_id: i64) -> TaskResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE board_id = ?1 AND deleted_at IS NULL ORDER BY priority DESC, created_at ASC, id ASC",
            TASK_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt.query_map(params![board_id], task_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Active tasks of a board in one status column, in listing order.
    pub fn list_tasks_by_status(&self, board_id: i64, status: Status) -> TaskResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE board_id = ?1 AND status = ?2 AND deleted_at IS NULL ORDER BY priority DESC, created_at ASC, id ASC",
            TASK_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![board_id, status], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Moves a task to any status; there are no transition restrictions.
    pub fn update_task_status(&self, id: i64, status: Status) -> TaskResult<()> {
        let affected = self.conn.execute(UPDATE_STATUS, params![id, status, Utc::now()])?;
        if affected == 0 {
            return Err(TaskError::not_found(format!("task {} not found", id)));
        }
        tracing::debug!(id, %status, "updated task status");
        Ok(())
    }

    /// Replaces title and description together.
    pub fn update_task(&self, id: i64, title: &str, description: &str) -> TaskResult<()> {
        let title = validate_title(title)?;
        let affected = self.conn.execute(UPDATE_FIELDS, params![id, title, description, Utc::now()])?;
        if affected == 0 {
            return Err(TaskError::not_found(format!("task {} not found", id)));
        }
        Ok(())
    }

    /// Sets the priority from a name or a level and returns the stored value.
    ///
    /// The input is validated before the row is touched, so a rejected value
    /// leaves the task unchanged.
    pub fn update_task_priority(&self, id: i64, priority: &PriorityInput) -> TaskResult<Priority> {
        let priority = priority.resolve()?;
        let affected = self.conn.execute(UPDATE_PRIORITY, params![id, priority, Utc::now()])?;
        if affected == 0 {
            return Err(TaskError::not_found(format!("task {} not found", id)));
        }
        tracing::debug!(id, %priority, "updated task priority");
        Ok(priority)
    }

    /// Hides a task from every read. Links are left in place.
    pub fn soft_delete(&self, id: i64) -> TaskResult<()> {
        let affected = self.conn.execute(SOFT_DELETE, params![id, Utc::now()])?;
        if affected == 0 {
            return Err(TaskError::conflict(format!("task {} not found or already deleted", id)));
        }
        tracing::debug!(id, "soft-deleted task");
        Ok(())
    }

    /// Clears `deleted_at`. Active, missing and hard-deleted ids are `Conflict`.
    pub fn restore_task(&self, id: i64) -> TaskResult<()> {
        let affected = self.conn.execute(RESTORE, params![id, Utc::now()])?;
        if affected == 0 {
            return Err(TaskError::conflict(format!("task {} not found or not deleted", id)));
        }
        tracing::debug!(id, "restored task");
        Ok(())
    }

    /// Removes the task and every link touching it in one transaction.
    ///
    /// Applies to active and soft-deleted rows alike.
    pub fn hard_delete(&self, id: i64) -> TaskResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let links = tx.execute(DELETE_TASK_LINKS, params![id])?;
        let affected = tx.execute(DELETE_TASK, params![id])?;
        if affected == 0 {
            // Dropping the transaction rolls back the link removal.
            return Err(TaskError::not_found(format!("task {} not found", id)));
        }

        tx.commit()?;
        tracing::debug!(id, links, "permanently deleted task");
        Ok(())
    }

    /// Active tasks of a board that fuzzy-match `query`, best match first.
    ///
    /// Equal scores keep the listing order.
    pub fn search_tasks(&self, board_id: i64, query: &str) -> TaskResult<Vec<Task>> {
        if query.trim().is_empty() {
            return Err(TaskError::validation("search query cannot be empty"));
        }

        let mut scored: Vec<(i64, Task)> = self
            .list_tasks(board_id)?
            .into_iter()
            .filter_map(|task| {
                let score = match_score(&task.title, query);
                (score > 0).then_some((score, task))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, task)| task).collect())
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        board_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        priority: row.get(5)?,
        deleted_at: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
