//! In-process key-value store backed by DashMap. Clones share the same map,
//! so a clone handed to a second `ConfigStore` behaves like a restart.

use crate::kv::KeyValueStore;
use dashmap::DashMap;
use reward_core::StoreResult;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    store: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.store.insert(key.to_string(), value.to_string());
        store
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.store.remove(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
