//! Error types for the head gesture library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame could not be decoded from JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters or landmark data provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Notification delivery failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
