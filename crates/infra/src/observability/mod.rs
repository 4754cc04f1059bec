//! Tracing setup
//!
//! `RUST_LOG` wins over the configured level so a single run can be made
//! louder without touching the config file.

use eshop_domain::LoggingConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, or an
/// embedding application that set up its own).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = if config.json {
        fmt().with_env_filter(env_filter).with_target(true).json().try_init()
    } else {
        fmt().with_env_filter(env_filter).with_target(true).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
            true
        }
        Err(_) => false,
    }
}
