use crate::errors::{lock_poisoned, Result};
use crate::kv::{validate_key, KeyValueStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value store
///
/// Clones share the same map, so a test can keep a handle to inspect or
/// tamper with what a `LocalCache` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let items = self.items.read().map_err(|_| lock_poisoned("read_kv"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let mut items = self.items.write().map_err(|_| lock_poisoned("write_kv"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut items = self.items.write().map_err(|_| lock_poisoned("remove_kv"))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_items() {
        let kv = MemoryKvStore::new();
        let handle = kv.clone();

        kv.set_item("localPosts", "[]").unwrap();

        assert_eq!(handle.get_item("localPosts").unwrap().as_deref(), Some("[]"));
    }
}
