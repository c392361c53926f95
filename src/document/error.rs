//! Document error types
//!
//! Low-level failures from resolving, stat-ing and reading documents.
//! Handlers map these onto the HTTP taxonomy in `crate::error`.

use std::time::Duration;

use thiserror::Error;

/// Document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Missing file, non-regular file, or an id escaping the root
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Failed to parse document structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// Full parse exceeded its time bound
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Background task failed to complete
    #[error("Task error: {0}")]
    Task(String),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocumentError::NotFound(_))
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::Parse(err.to_string())
    }
}
