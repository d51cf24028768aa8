//! postlist Store - durable local cache for locally created posts
//!
//! Provides:
//! - A `KeyValueStore` surface with filesystem, SQLite and in-memory backends
//! - `LocalCache`, the adapter that keeps the local post sequence under the
//!   `"localPosts"` key as a JSON array

pub mod errors;
pub mod kv;
pub mod local_cache;

// Re-export key types
pub use errors::Result;
pub use kv::{FsKvStore, KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use local_cache::{LocalCache, LOCAL_POSTS_KEY};
