use std::time::Duration;

use eshop_domain::EshopError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"cart::checkout"`).
/// * `elapsed` - Duration the command execution took.
/// * `error_type` - Stable error label when the command failed.
///
/// Callers must avoid forwarding credentials or tokens in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert an `EshopError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &EshopError) -> &'static str {
    match error {
        EshopError::Config(_) => "config",
        EshopError::Storage(_) => "storage",
        EshopError::Network(_) => "network",
        EshopError::Auth(_) => "auth",
        EshopError::NotFound(_) => "not_found",
        EshopError::Validation(_) => "validation",
        EshopError::Internal(_) => "internal",
    }
}
