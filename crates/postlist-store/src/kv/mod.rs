//! Durable key-value surface
//!
//! Provides:
//! - `KeyValueStore`, the synchronous get/set/remove contract
//! - Filesystem backend with temp→rename writes
//! - SQLite backend
//! - In-memory backend for tests and ephemeral sessions

mod atomic;
mod fs_store;
mod memory;
mod sqlite_store;

pub use fs_store::FsKvStore;
pub use memory::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

use crate::errors::{invalid_key, Result};

/// Synchronous string key-value storage
///
/// Implementations must make `set_item` atomic from a reader's perspective:
/// a `get_item` after `set_item` returns either the old or the new value,
/// never a partial one.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing was ever stored
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Check a key is usable by every backend (it doubles as a file name)
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(invalid_key(key))
    }
}
