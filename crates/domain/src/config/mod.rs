//! Configuration structures
//!
//! Loaded by `eshop_infra::config` from the environment or a JSON/TOML file.
//! Every section has defaults, so a file only needs the keys it overrides.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_PUBLIC_BASE_URL, DEFAULT_STORAGE_NAMESPACE,
    DEFAULT_TIMEOUT_SECS, SEARCH_HISTORY_SUFFIX,
};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Ordering API endpoints and transport limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for authenticated endpoints (e.g. `https://shop.example.com/api`)
    pub base_url: String,
    /// Site root used by the public tracking page (`/api/orders/search`)
    pub public_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Route requests through the proxy named by `HTTP(S)_PROXY`.
    pub use_system_proxy: bool,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            use_system_proxy: true,
        }
    }
}

/// Where client-side state (tokens, cart, search history) is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON state file. `None` keeps state in memory only.
    pub path: Option<PathBuf>,
    /// Keep tokens in the OS keychain instead of the state file.
    pub use_keychain: bool,
    /// Prefix for the search history key (the site host in the browser).
    pub namespace: String,
}

impl StorageConfig {
    /// Storage key of the public search history.
    #[must_use]
    pub fn search_history_key(&self) -> String {
        format!("{}{}", self.namespace, SEARCH_HISTORY_SUFFIX)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: None, use_keychain: false, namespace: DEFAULT_STORAGE_NAMESPACE.to_string() }
    }
}

/// Product catalog paging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
