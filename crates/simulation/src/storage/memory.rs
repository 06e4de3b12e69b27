//! In-memory key-value storage

use dashmap::DashMap;
use std::sync::Arc;
use umbra_ports::{KeyValueStore, StorageResult};

/// In-memory key-value storage
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<DashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.delete("k").unwrap();
        storage.delete("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();

        storage.set("shared", "yes").unwrap();
        assert!(handle.contains("shared"));
    }
}
