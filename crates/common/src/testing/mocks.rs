//! Mock implementations of common traits

// Mocks favour brevity over exhaustive error docs.
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// In-memory [`KeyValueStore`] that counts calls and can fail on demand.
///
/// # Examples
///
/// ```
/// use eshop_common::storage::KeyValueStore;
/// use eshop_common::testing::mocks::MockKeyValueStore;
///
/// let store = MockKeyValueStore::new();
/// store.set("key1", "value1").unwrap();
/// assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));
/// assert_eq!(store.set_calls(), 1);
///
/// store.fail_writes(true);
/// assert!(store.set("key1", "value2").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockKeyValueStore {
    data: Mutex<HashMap<String, String>>,
    failing_writes: AtomicBool,
    failing_reads: AtomicBool,
    sets: AtomicUsize,
    deletes: AtomicUsize,
}

impl MockKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a call.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.data.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `set`/`delete` fail (after being counted).
    pub fn fail_writes(&self, fail: bool) {
        self.failing_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail.
    pub fn fail_reads(&self, fail: bool) {
        self.failing_reads.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.data.lock().clone()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> StorageResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("mock {op} failure")));
        }
        Ok(())
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check(&self.failing_reads, "read")?;
        Ok(self.data.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check(&self.failing_writes, "write")?;
        self.data.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(&self.failing_writes, "delete")?;
        self.data.lock().remove(key);
        Ok(())
    }
}
