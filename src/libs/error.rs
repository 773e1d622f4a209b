//! Error taxonomy shared by the storage layer, the resolver and the board
//! registry.
//!
//! Front ends never reinterpret these: the CLI prints the message and exits
//! non-zero, the tool server maps the variant onto a JSON-RPC error code.

use thiserror::Error;

/// Maximum number of suggestions carried by [`TaskError::Ambiguous`].
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Malformed input. Always caller-fixable.
    #[error("{0}")]
    Validation(String),

    /// The referenced task or link does not exist or is not visible.
    #[error("{0}")]
    NotFound(String),

    /// The request is well-formed but inconsistent with the current state.
    #[error("{0}")]
    Conflict(String),

    /// Fuzzy resolution matched more than one task.
    #[error("multiple tasks match '{identifier}':\n{}\nPlease be more specific or use the task ID", .suggestions.join("\n"))]
    Ambiguous { identifier: String, suggestions: Vec<String> },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("migration v{version} ({name}) failed: {source}")]
    Migration {
        version: u32,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// True for failures of the underlying store rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Migration { .. })
    }
}

pub type TaskResult<T> = Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_lists_suggestions() {
        let err = TaskError::Ambiguous {
            identifier: "login".into(),
            suggestions: vec!["#1 Fix login".into(), "#2 Login page".into()],
        };
        let text = err.to_string();
        assert!(text.starts_with("multiple tasks match 'login':"));
        assert!(text.contains("#1 Fix login\n#2 Login page"));
        assert!(text.ends_with("use the task ID"));
    }

    #[test]
    fn storage_classification() {
        assert!(TaskError::from(rusqlite::Error::QueryReturnedNoRows).is_storage());
        assert!(!TaskError::validation("x").is_storage());
    }
}
