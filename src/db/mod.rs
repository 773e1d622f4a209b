//! Persistence gateway and entity core.
//!
//! [`db::Db`] owns the SQLite connection and the schema; [`tasks::Tasks`] and
//! [`links::Links`] borrow it for every task and link operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cainban::db::{db::Db, links::Links, tasks::Tasks};
//! use cainban::libs::task::{LinkType, Status, DEFAULT_BOARD_ID};
//!
//! let db = Db::open("/tmp/cainban.db")?;
//! let tasks = Tasks::new(&db);
//! let a = tasks.create_task(DEFAULT_BOARD_ID, "Fix login bug", "", Some("high".into()))?;
//! let b = tasks.create_task(DEFAULT_BOARD_ID, "Write tests", "", None)?;
//! tasks.update_task_status(a.id, Status::Doing)?;
//! Links::new(&db).link_tasks(b.id, a.id, LinkType::DependsOn)?;
//! # Ok::<(), cainban::libs::error::TaskError>(())
//! ```

/// Connection management and schema initialization.
pub mod db;

/// Versioned, idempotent schema migrations.
pub mod migrations;

/// Task CRUD, soft/hard delete and fuzzy search.
pub mod tasks;

/// Typed links between tasks.
pub mod links;
