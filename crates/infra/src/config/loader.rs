//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ESHOP_API_BASE_URL` (required): base URL of the authenticated API
//! - `ESHOP_PUBLIC_BASE_URL`: site root of the public tracking endpoints
//! - `ESHOP_API_TIMEOUT_SECS`: per-request timeout in seconds
//! - `ESHOP_STORAGE_PATH`: JSON state file (tokens, cart, search history)
//! - `ESHOP_STORAGE_KEYCHAIN`: keep tokens in the OS keychain (true/false)
//! - `ESHOP_STORAGE_NAMESPACE`: prefix of the search history key
//! - `ESHOP_PAGE_SIZE`: product catalog page size
//! - `ESHOP_LOG_LEVEL`: default tracing filter when `RUST_LOG` is unset
//! - `ESHOP_LOG_JSON`: emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./eshop.json` or `./eshop.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use eshop_domain::{
    ApiConfig, CatalogConfig, Config, EshopError, LoggingConfig, Result, StorageConfig,
};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or a value is invalid, falls back to loading from a
/// config file.
///
/// # Errors
/// Returns `EshopError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `ESHOP_API_BASE_URL` must be present; every other value falls back to
/// its default.
///
/// # Errors
/// Returns `EshopError::Config` if the required variable is missing or a
/// numeric value does not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("ESHOP_API_BASE_URL")?;

    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        base_url,
        public_base_url: std::env::var("ESHOP_PUBLIC_BASE_URL")
            .unwrap_or(api_defaults.public_base_url),
        timeout_secs: env_parse("ESHOP_API_TIMEOUT_SECS", api_defaults.timeout_secs)?,
        use_system_proxy: env_bool("ESHOP_API_SYSTEM_PROXY", api_defaults.use_system_proxy),
    };

    let storage_defaults = StorageConfig::default();
    let storage = StorageConfig {
        path: std::env::var("ESHOP_STORAGE_PATH").ok().map(PathBuf::from),
        use_keychain: env_bool("ESHOP_STORAGE_KEYCHAIN", storage_defaults.use_keychain),
        namespace: std::env::var("ESHOP_STORAGE_NAMESPACE").unwrap_or(storage_defaults.namespace),
    };

    let catalog = CatalogConfig {
        page_size: env_parse("ESHOP_PAGE_SIZE", CatalogConfig::default().page_size)?,
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var("ESHOP_LOG_LEVEL").unwrap_or(logging_defaults.level),
        json: env_bool("ESHOP_LOG_JSON", logging_defaults.json),
    };

    Ok(Config { api, storage, catalog, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `EshopError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EshopError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EshopError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EshopError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(EshopError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("eshop.json"),
        dir.join("eshop.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| EshopError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable, `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| EshopError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).ok().map_or(default, |s| {
        matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    })
}
