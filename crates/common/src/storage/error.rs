//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is not a JSON object: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;
