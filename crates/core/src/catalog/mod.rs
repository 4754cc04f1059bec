//! Product catalog browsing state

pub mod ports;
pub mod store;

pub use store::{CatalogState, ProductCatalog};
