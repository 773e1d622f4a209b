//! Domain types and the services built on top of the store.
//!
//! - [`task`]: task and link entities, status/priority/link-type vocabularies
//! - [`error`]: the error taxonomy every core operation returns
//! - [`resolver`]: fuzzy task references
//! - [`board`]: board name to store mapping and the current-board marker
//! - [`config`], [`data_storage`]: the application directory and its settings
//! - [`messages`], [`view`]: CLI output

pub mod board;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod resolver;
pub mod task;
pub mod view;
