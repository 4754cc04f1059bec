//! Modular common utilities shared across e-shop crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: key/value storage (memory, JSON file) and the token store
//! - `platform`: OS credential store backend (`keyring`)
//! - `test-utils`: recording/failing store mocks for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;
#[cfg(feature = "foundation")]
pub mod storage;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "foundation", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use auth::{TokenKind, TokenPair, TokenStore};
#[cfg(feature = "platform")]
pub use storage::KeychainStore;
#[cfg(feature = "foundation")]
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
