//! Gradebook error types.
//!
//! Validation and lookup failures are ordinary values the caller reports and
//! moves past. Only I/O and configuration failures end the operation that
//! raised them, and even those leave the in-memory store intact.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the record store, the row codec, and file storage.
#[derive(Debug, Error)]
pub enum GradebookError {
    /// A score was outside [0, 20] or not a number at all.
    #[error("invalid score '{input}': enter a number between 0 and 20")]
    InvalidScore { input: String },

    /// No student with this identifier exists in the store.
    #[error("student with ID '{id}' not found")]
    NotFound { id: String },

    /// A persisted row could not be turned into a student.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl GradebookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GradebookError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for conditions that are reported and then ignored.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GradebookError::InvalidScore { .. } | GradebookError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;
