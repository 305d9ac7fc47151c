//! Error types for calitask.

use thiserror::Error;

/// Errors that can occur in calitask operations.
///
/// Malformed feed content is not an error: unparseable fields and
/// unrecognized values simply come back as `None`.
#[derive(Error, Debug)]
pub enum CaliTaskError {
    #[error("Recurrence interval must be positive, got {interval}")]
    DegenerateRecurrence { interval: i64 },

    #[error("Recurrence could not advance past {0}")]
    RecurrenceOverflow(String),

    #[error("Unrecognized due date: '{0}'")]
    InvalidDueDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calitask operations.
pub type CaliTaskResult<T> = Result<T, CaliTaskError>;
