//! Local Cache
//!
//! Keeps the sequence of locally created posts under a single key as a JSON
//! array, overwritten in full on every save.

use crate::errors::{decode_error, serialization_error, Result};
use crate::kv::KeyValueStore;
use postlist_core::logging_facility::schema::{OP_CACHE_LOAD, OP_CACHE_SAVE};
use postlist_core::Post;

/// Key the local post sequence is stored under
pub const LOCAL_POSTS_KEY: &str = "localPosts";

/// Durable storage of locally created posts
pub struct LocalCache {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl LocalCache {
    /// Cache over `store` using the default `"localPosts"` key
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_key(store, LOCAL_POSTS_KEY)
    }

    /// Cache over `store` under a custom key, for running several clients
    /// against one backend
    pub fn with_key(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted posts, surfacing every failure
    ///
    /// An absent or blank payload is an empty sequence.
    ///
    /// # Errors
    ///
    /// Backend read failures, and `Decode` when the payload is not a JSON
    /// array of posts.
    pub fn try_load(&self) -> Result<Vec<Post>> {
        match self.store.get_item(&self.key)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| decode_error(&self.key, e)),
        }
    }

    /// Load the persisted posts
    ///
    /// Never fails: a malformed payload or an unreadable backend is logged
    /// and treated as an empty sequence.
    pub fn load(&self) -> Vec<Post> {
        match self.try_load() {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!(
                    component = module_path!(),
                    op = OP_CACHE_LOAD,
                    key = %self.key,
                    err.code = err.code(),
                    err.message = err.message(),
                    "local cache unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Replace the persisted sequence with `posts`
    ///
    /// # Errors
    ///
    /// Serialization or backend write failures; on error the previously
    /// persisted sequence is left intact.
    pub fn save(&self, posts: &[Post]) -> Result<()> {
        let payload =
            serde_json::to_string(posts).map_err(|e| serialization_error(&self.key, e))?;
        self.store.set_item(&self.key, &payload)?;
        tracing::debug!(
            component = module_path!(),
            op = OP_CACHE_SAVE,
            key = %self.key,
            count = posts.len(),
        );
        Ok(())
    }

    /// Remove every persisted post
    ///
    /// # Errors
    ///
    /// Backend failures removing the key.
    pub fn clear(&self) -> Result<()> {
        self.store.remove_item(&self.key)
    }
}

impl std::fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache").field("key", &self.key).finish()
    }
}
