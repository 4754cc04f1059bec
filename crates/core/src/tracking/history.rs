//! Recent tracking searches
//!
//! Stored as one comma-joined string, most recent first, at most
//! [`SEARCH_HISTORY_LIMIT`] entries. A term containing a comma is split
//! into several entries when read back.

use std::sync::Arc;

use eshop_common::KeyValueStore;
use eshop_domain::constants::SEARCH_HISTORY_LIMIT;
use eshop_domain::Result;

use crate::errors::IntoEshopError;

/// Persistent most-recent-first search list
pub struct SearchHistory {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SearchHistory {
    /// # Arguments
    /// * `key` - Storage key, `<host>_search_log` in the browser
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved terms, most recent first. Blank entries are skipped.
    ///
    /// # Errors
    /// `Storage` when the backend cannot be read.
    pub fn entries(&self) -> Result<Vec<String>> {
        let stored = self.storage.get(&self.key).into_eshop()?;
        Ok(stored
            .map(|raw| {
                raw.split(',').filter(|item| !item.trim().is_empty()).map(str::to_string).collect()
            })
            .unwrap_or_default())
    }

    /// Move `term` to the front (adding it if new) and trim to the limit.
    ///
    /// Returns the updated list.
    ///
    /// # Errors
    /// `Storage` when the backend cannot be read or written.
    pub fn record(&self, term: &str) -> Result<Vec<String>> {
        let mut history = self.entries()?;
        history.retain(|item| item != term);
        history.insert(0, term.to_string());
        history.truncate(SEARCH_HISTORY_LIMIT);

        self.storage.set(&self.key, &history.join(",")).into_eshop()?;
        Ok(history)
    }

    /// Forget every saved term.
    ///
    /// # Errors
    /// `Storage` when the key cannot be removed.
    pub fn clear(&self) -> Result<()> {
        self.storage.delete(&self.key).into_eshop()
    }
}
