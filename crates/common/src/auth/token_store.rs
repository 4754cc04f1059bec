//! Token store over an injectable key/value backend

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::storage::{KeyValueStore, StorageResult};

/// Which token of the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Storage key the token is persisted under.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Access => "access_token",
            Self::Refresh => "refresh_token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Access/refresh credentials issued by login or refresh
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

// Tokens must never reach logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Reads and writes the token pair.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Current value of one token.
    ///
    /// # Errors
    /// Propagates backend read failures.
    pub fn get(&self, kind: TokenKind) -> StorageResult<Option<String>> {
        self.backend.get(kind.storage_key())
    }

    /// Persist one token immediately. Content is not validated.
    ///
    /// # Errors
    /// Propagates backend write failures.
    pub fn set(&self, kind: TokenKind, value: &str) -> StorageResult<()> {
        self.backend.set(kind.storage_key(), value)
    }

    /// Persist both tokens of a freshly issued pair.
    ///
    /// # Errors
    /// Propagates backend write failures.
    pub fn store_pair(&self, pair: &TokenPair) -> StorageResult<()> {
        self.set(TokenKind::Access, &pair.access_token)?;
        self.set(TokenKind::Refresh, &pair.refresh_token)?;
        debug!("Token pair stored");
        Ok(())
    }

    /// Both tokens, if both are present.
    ///
    /// # Errors
    /// Propagates backend read failures.
    pub fn pair(&self) -> StorageResult<Option<TokenPair>> {
        let access = self.get(TokenKind::Access)?;
        let refresh = self.get(TokenKind::Refresh)?;
        Ok(access.zip(refresh).map(|(a, r)| TokenPair::new(a, r)))
    }

    /// Whether an access token is stored.
    ///
    /// # Errors
    /// Propagates backend read failures.
    pub fn has_access_token(&self) -> StorageResult<bool> {
        Ok(self.get(TokenKind::Access)?.is_some())
    }

    /// Remove both tokens. Both deletes are attempted even if the first
    /// fails; the first failure is returned.
    ///
    /// # Errors
    /// Propagates backend delete failures.
    pub fn clear(&self) -> StorageResult<()> {
        let access = self.backend.delete(TokenKind::Access.storage_key());
        let refresh = self.backend.delete(TokenKind::Refresh.storage_key());
        debug!("Token pair cleared");
        access.and(refresh)
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
