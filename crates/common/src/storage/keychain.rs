//! OS credential store backend
//!
//! Each key becomes one `keyring` entry under a shared service name
//! (macOS Keychain, Windows Credential Manager, Linux Secret Service).
//! Intended for the token pair; bulky state belongs in [`super::FileStore`].

use keyring::Entry;
use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::traits::KeyValueStore;

/// [`KeyValueStore`] over the platform keychain.
#[derive(Debug, Clone)]
pub struct KeychainStore {
    service_name: String,
}

impl KeychainStore {
    /// # Arguments
    /// * `service_name` - Service identifier (e.g. `"xinyutian-eshop"`)
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> StorageResult<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StorageError::Keychain(format!("Failed to open keychain entry {key}: {e}"))
        })
    }
}

impl KeyValueStore for KeychainStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Keychain(format!("Failed to read {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::Keychain(format!("Failed to store {key}: {e}")))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Keychain(format!("Failed to delete {key}: {e}"))),
        }
    }
}
