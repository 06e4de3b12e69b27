use crate::error::StorageResult;

/// Port for durable string key-value storage
///
/// Mirrors the browser local-storage contract the simulation was built
/// around: whole values are read and written per key, with no transactions
/// and no locking between writers. Concurrent writers to one key race and
/// the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }
}
