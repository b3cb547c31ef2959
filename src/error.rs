//! Error types for corefr.

use thiserror::Error;

/// Result type for corefr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefr operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed parsed document (dangling head, head cycle, empty input).
    #[error("Invalid document: {0}")]
    Document(String),

    /// Invalid input provided to an API call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Chain evaluation error (mismatched documents, empty gold).
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl Error {
    /// Create a document error.
    pub fn document(msg: impl Into<String>) -> Self {
        Error::Document(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an evaluation error.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Error::Evaluation(msg.into())
    }
}
