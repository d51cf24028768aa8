//! Core types shared across postlist facilities
//!
//! - **Correlation**: `RequestId` stamped on every store operation
//! - **Schema constants**: canonical field keys and event names for logging

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
