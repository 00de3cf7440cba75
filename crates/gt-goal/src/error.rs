// error.rs — Error types for the goal store.

use thiserror::Error;

/// Errors that can occur during goal store operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A required field was missing or out of range.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The requested goal was not found.
    #[error("goal not found: {0}")]
    NotFound(i64),

    /// The underlying SQLite open/query/commit failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A stored row holds a label or date that no longer parses.
    #[error("goal {id} has a malformed column: {reason}")]
    Corrupt { id: i64, reason: String },

    /// Writing or parsing the delimited export failed.
    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    /// An I/O failure while flushing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoalError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        GoalError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
