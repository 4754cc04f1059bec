//! Conversions from lower-layer errors into [`EshopError`]

use eshop_common::StorageError;
use eshop_domain::{EshopError, Result};

/// Lift a storage result into the domain error type.
pub trait IntoEshopError<T> {
    /// # Errors
    /// Returns `EshopError::Storage` carrying the original message.
    fn into_eshop(self) -> Result<T>;
}

impl<T> IntoEshopError<T> for std::result::Result<T, StorageError> {
    fn into_eshop(self) -> Result<T> {
        self.map_err(|e| EshopError::Storage(e.to_string()))
    }
}
