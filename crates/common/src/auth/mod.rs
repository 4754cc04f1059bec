//! Bearer token persistence
//!
//! The [`TokenStore`] is the single source of truth for the access/refresh
//! pair. It does not cache: every read goes to the injected
//! [`KeyValueStore`](crate::storage::KeyValueStore), so a pair written by
//! one component is visible to every other component immediately.

pub mod token_store;

pub use token_store::{TokenKind, TokenPair, TokenStore};
