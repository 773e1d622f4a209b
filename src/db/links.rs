//! Typed links between tasks.
//!
//! ## Features
//!
//! - **Link types**: `blocks`, `depends_on`, `related_to`
//! - **Uniqueness**: one link per (from, to, type), enforced by a unique index
//! - **Cleanup**: links go away with a hard-deleted task

use crate::db::db::Db;
use crate::db::tasks::Tasks;
use crate::libs::error::{TaskError, TaskResult};
use crate::libs::task::{Link, LinkType};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};

const INSERT_LINK: &str = "INSERT INTO task_links (from_task_id, to_task_id, link_type, created_at) VALUES (?1, ?2, ?3, ?4)";
const DELETE_LINK: &str = "DELETE FROM task_links WHERE from_task_id = ?1 AND to_task_id = ?2 AND link_type = ?3";
const SELECT_LINK_BY_ID: &str = "SELECT id, from_task_id, to_task_id, link_type, created_at FROM task_links WHERE id = ?1";
const SELECT_LINKS_BY_TASK: &str = "
    SELECT id, from_task_id, to_task_id, link_type, created_at FROM task_links
    WHERE from_task_id = ?1 OR to_task_id = ?1
    ORDER BY created_at DESC, id DESC
";

/// Directed, typed relations between tasks of one store.
pub struct Links<'a> {
    db: &'a Db,
    conn: &'a Connection,
}

impl<'a> Links<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db, conn: &db.conn }
    }

    /// Creates the edge `from -> to`.
    ///
    /// A self-link is rejected before either endpoint is looked up.
    pub fn link_tasks(&self, from_id: i64, to_id: i64, link_type: LinkType) -> TaskResult<Link> {
        if from_id == to_id {
            return Err(TaskError::validation("cannot link task to itself"));
        }

        let tasks = Tasks::new(self.db);
        tasks.get_task(from_id)?;
        tasks.get_task(to_id)?;

        match self.conn.execute(INSERT_LINK, params![from_id, to_id, link_type, Utc::now()]) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(TaskError::conflict(format!(
                    "link already exists: task {} {} task {}",
                    from_id, link_type, to_id
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, from_id, to_id, %link_type, "linked tasks");

        let link = self.conn.query_row(SELECT_LINK_BY_ID, params![id], link_from_row)?;
        Ok(link)
    }

    /// Removes the link with exactly these endpoints and type.
    ///
    /// Fails with `NotFound` when no such link exists.
    pub fn unlink_tasks(&self, from_id: i64, to_id: i64, link_type: LinkType) -> TaskResult<()> {
        let affected = self.conn.execute(DELETE_LINK, params![from_id, to_id, link_type])?;
        if affected == 0 {
            return Err(TaskError::not_found(format!(
                "no link found between tasks {} and {} with type {}",
                from_id, to_id, link_type
            )));
        }
        tracing::debug!(from_id, to_id, %link_type, "unlinked tasks");
        Ok(())
    }

    /// Links in both directions, most recent first.
    pub fn get_task_links(&self, task_id: i64) -> TaskResult<Vec<Link>> {
        let mut stmt = self.conn.prepare(SELECT_LINKS_BY_TASK)?;
        let links = stmt
            .query_map(params![task_id], link_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }
}

fn link_from_row(row: &rusqlite::Row) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        from_task_id: row.get(1)?,
        to_task_id: row.get(2)?,
        link_type: row.get(3)?,
        created_at: row.get(4)?,
    })
}
