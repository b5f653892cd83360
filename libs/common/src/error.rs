//! Custom error types for the common library
//!
//! This module defines the error type shared by the item store and
//! session store implementations.

use redis::RedisError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested item does not exist
    #[error("item not found")]
    NotFound,

    /// Error occurred during a database query
    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    /// Error occurred talking to the session backend
    #[error("session backend error: {0}")]
    Cache(#[from] RedisError),

    /// A stored payload could not be decoded
    #[error("stored payload corrupt: {0}")]
    Corrupt(String),

    /// Configuration error
    #[error("store configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
