//! API-specific error types
//!
//! Provides error classification for calls against the ordering API.

use std::time::Duration;

use eshop_common::StorageError;
use eshop_domain::EshopError;
use serde_json::Value;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403, or the session could not be refreshed
    Authentication,
    /// Other 4xx and requests rejected before sending
    Client,
    /// 5xx and unreadable response bodies
    Server,
    /// No response (connection failure, timeout)
    Network,
    /// Local configuration or token storage problems
    Config,
}

/// API operation errors
///
/// `Clone` because one refresh outcome is delivered to every request queued
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Session expired, please log in again")]
    AuthExpired,

    /// The refresh call itself failed; the session has been ended.
    #[error("Session expired, please log in again ({0})")]
    RefreshFailed(Box<ApiError>),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::AuthExpired | Self::RefreshFailed(_) | Self::Http { status: 401 | 403, .. } => {
                ApiErrorCategory::Authentication
            }
            Self::Http { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Http { .. } | Self::Validation(_) => ApiErrorCategory::Client,
            Self::Decode(_) => ApiErrorCategory::Server,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Storage(_) | Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether the server answered 401.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Why the session could not be refreshed (server unreachable, refresh
    /// token revoked, ...).
    pub fn refresh_cause(&self) -> Option<&Self> {
        match self {
            Self::RefreshFailed(cause) => Some(cause),
            _ => None,
        }
    }

    /// HTTP status, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message for display.
    ///
    /// For HTTP errors this is the server's `detail` field when present
    /// (a string, or the `msg` entries of a validation error list), else
    /// the raw body.
    pub fn detail(&self) -> String {
        match self {
            Self::Http { body, .. } => detail_from_body(body),
            other => other.to_string(),
        }
    }
}

fn detail_from_body(body: &str) -> String {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match map.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> =
                items.iter().filter_map(|item| item.get("msg").and_then(Value::as_str)).collect();
            if messages.is_empty() {
                body.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => body.to_string(),
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Convert into the workspace-wide error at the port boundary
impl From<ApiError> for EshopError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            ApiError::AuthExpired => Self::Auth(ApiError::AuthExpired.to_string()),
            ApiError::RefreshFailed(cause) => {
                Self::Auth(format!("session expired: {}", cause.detail()))
            }
            ApiError::Http { status, ref body } => {
                let message = detail_from_body(body);
                match status {
                    401 | 403 => Self::Auth(message),
                    404 => Self::NotFound(message),
                    400 | 409 | 422 => Self::Validation(message),
                    500.. => Self::Network(format!("server error {status}: {message}")),
                    _ => Self::Internal(message),
                }
            }
            ApiError::Validation(message) => Self::Validation(message),
            ApiError::Decode(message) => Self::Internal(message),
            ApiError::Storage(message) => Self::Storage(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}
