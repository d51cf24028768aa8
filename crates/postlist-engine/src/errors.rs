//! Error helpers for postlist-engine
//!
//! Every helper produces the canonical ExError from postlist-core.

use postlist_core::errors::{ExError, ExErrorKind};
use std::time::Duration;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Classify a reqwest failure
pub fn from_reqwest(operation: &str, err: reqwest::Error) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else if err.is_decode() {
        ExErrorKind::Decode
    } else {
        ExErrorKind::Transport
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a timeout error for a remote call bounded by `limit`
pub fn timeout_error(operation: &str, limit: Duration) -> ExError {
    ExError::new(ExErrorKind::Timeout)
        .with_op(operation.to_string())
        .with_message(format!("No response within {} ms", limit.as_millis()))
}

/// Create a configuration error for `variable`
pub fn config_error(variable: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config")
        .with_entity_id(variable)
        .with_message(reason)
}
