//! Storage port

use std::sync::Arc;

use super::error::StorageResult;

/// Synchronous string key/value store.
///
/// Reads and writes are expected to be cheap (in-memory map, small file,
/// credential store lookup) so callers may use them while holding a short
/// lock.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be updated.
    fn delete(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
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
