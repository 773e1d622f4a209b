//! # cainban
//!
//! Single-user kanban task tracking on SQLite, with a CLI and a JSON-RPC
//! tool server for AI agents on top of one shared core.
//!
//! ## Layout
//!
//! - [`db`]: store connection, schema migrations, task and link operations
//! - [`libs`]: entities, error taxonomy, fuzzy resolver, board registry, config, output
//! - [`commands`]: the `cainban` command line
//! - [`mcp`]: the stdio tool server
//!
//! ## Example
//!
//! ```rust,no_run
//! use cainban::db::{db::Db, tasks::Tasks};
//! use cainban::libs::resolver::Resolver;
//! use cainban::libs::task::DEFAULT_BOARD_ID;
//!
//! let db = Db::open_in_memory()?;
//! Tasks::new(&db).create_task(DEFAULT_BOARD_ID, "Fix login bug", "", Some("high".into()))?;
//! let task = Resolver::new(&db).resolve(DEFAULT_BOARD_ID, "login")?;
//! assert_eq!(task.title, "Fix login bug");
//! # Ok::<(), cainban::libs::error::TaskError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod mcp;
