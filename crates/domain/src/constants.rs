//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! client.

// Persisted state keys (tokens are keyed by eshop_common::auth::TokenKind)
pub const CART_STORAGE_KEY: &str = "xinyutian_cart";
pub const SEARCH_HISTORY_SUFFIX: &str = "_search_log";

// Search history
pub const SEARCH_HISTORY_LIMIT: usize = 10;

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

// Catalog paging
pub const DEFAULT_PAGE_SIZE: u32 = 20;

// Storage
pub const DEFAULT_STORAGE_NAMESPACE: &str = "localhost";
pub const KEYCHAIN_SERVICE: &str = "xinyutian-eshop";
