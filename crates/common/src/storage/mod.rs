//! Key/value persistence for client-side state
//!
//! Tokens, the shopping cart and the search history are small string
//! values stored under fixed keys. [`KeyValueStore`] is the injectable
//! seam; backends decide where the values live:
//!
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`FileStore`]: one JSON object on disk, written through on every change
//! - [`KeychainStore`] (feature `platform`): OS credential store

pub mod error;
pub mod file;
#[cfg(feature = "platform")]
pub mod keychain;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
#[cfg(feature = "platform")]
pub use keychain::KeychainStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
