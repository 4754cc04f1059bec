//! Integration tests for storage module
//!
//! These tests verify end-to-end persistence workflows:
//! - Token pair survives reopening the JSON state file
//! - Unrelated keys (cart, search history) share the file with tokens
//! - Clearing tokens leaves other keys untouched

#![cfg(feature = "foundation")]

use std::sync::Arc;

use eshop_common::storage::{FileStore, KeyValueStore};
use eshop_common::{TokenKind, TokenPair, TokenStore};

#[test]
fn token_pair_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eshop.json");

    {
        let tokens = TokenStore::new(Arc::new(FileStore::open(&path).unwrap()));
        tokens.store_pair(&TokenPair::new("access-1", "refresh-1")).unwrap();
    }

    let reopened = TokenStore::new(Arc::new(FileStore::open(&path).unwrap()));
    assert_eq!(reopened.pair().unwrap(), Some(TokenPair::new("access-1", "refresh-1")));
}

#[test]
fn clear_keeps_other_client_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eshop.json");
    let backend = Arc::new(FileStore::open(&path).unwrap());
    let tokens = TokenStore::new(backend.clone());

    backend.set("xinyutian_cart", "[]").unwrap();
    backend.set("localhost_search_log", "SF1,13812345678").unwrap();
    tokens.store_pair(&TokenPair::new("a", "r")).unwrap();
    tokens.clear().unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert!(reopened.get(TokenKind::Access.storage_key()).unwrap().is_none());
    assert!(reopened.get(TokenKind::Refresh.storage_key()).unwrap().is_none());
    assert_eq!(reopened.get("xinyutian_cart").unwrap().as_deref(), Some("[]"));
    assert_eq!(
        reopened.get("localhost_search_log").unwrap().as_deref(),
        Some("SF1,13812345678")
    );
}

#[test]
fn overwritten_tokens_replace_previous_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eshop.json");
    let tokens = TokenStore::new(Arc::new(FileStore::open(&path).unwrap()));

    tokens.store_pair(&TokenPair::new("old-a", "old-r")).unwrap();
    tokens.store_pair(&TokenPair::new("new-a", "new-r")).unwrap();

    let reopened = TokenStore::new(Arc::new(FileStore::open(&path).unwrap()));
    assert_eq!(reopened.get(TokenKind::Access).unwrap().as_deref(), Some("new-a"));
    assert_eq!(reopened.get(TokenKind::Refresh).unwrap().as_deref(), Some("new-r"));
}
