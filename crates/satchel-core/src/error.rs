//! Error types for the Satchel backend.

use thiserror::Error;

/// Result type alias using Satchel's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Satchel operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No user exists for the given firebase uid
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Shortcut not found
    #[error("Shortcut not found: {0}")]
    ShortcutNotFound(uuid::Uuid),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
