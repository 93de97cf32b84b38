//! Error types for studbook-state

use thiserror::Error;

/// Errors that can occur while reading from the studbook
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend rejected or failed a query
    #[error("Studbook query failed: {0}")]
    Backend(String),

    /// The backend could not be reached
    #[error("Studbook unavailable: {0}")]
    Unavailable(String),

    /// A studbook fixture could not be parsed
    #[error("Invalid studbook fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    /// A studbook fixture could not be read
    #[error("Failed to read studbook fixture: {0}")]
    Io(#[from] std::io::Error),
}
