//! JSON-RPC tool server for AI agents (`cainban mcp`).
//!
//! Speaks newline-delimited JSON-RPC 2.0 over stdio and exposes every task,
//! link and board operation as a named tool.

pub mod jsonrpc;
pub mod server;
pub mod tools;

pub use server::{run, McpServer};
pub use tools::{ToolError, ToolServer};
