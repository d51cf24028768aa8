//! Error handling for postlist-store
//!
//! Wraps postlist-core ExError with store-specific helpers

use postlist_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a decode error for a payload stored under `key`
pub fn decode_error(key: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Decode)
        .with_op("cache_load")
        .with_entity_id(key)
        .with_message(format!("Stored payload is not a post list: {}", err))
}

/// Create a serialization error for a payload about to be stored
pub fn serialization_error(key: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("cache_save")
        .with_entity_id(key)
        .with_message(err.to_string())
}

/// Create an invalid key error
pub fn invalid_key(key: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("kv_key")
        .with_entity_id(key)
        .with_message("Keys must be non-empty and use only [A-Za-z0-9_.-]")
}

/// Create a poisoned lock error
pub fn lock_poisoned(operation: &str) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op(operation.to_string())
        .with_message("Backend lock poisoned by a panicking writer")
}
