//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened or configured.
    #[error("database connection error: {message}")]
    ConnectionError { message: String },

    #[error("database query error: {message}")]
    QueryError { message: String },

    /// The blocking task running a query panicked or was cancelled.
    #[error("storage task failed: {message}")]
    TaskError { message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryError {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::TaskError {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
