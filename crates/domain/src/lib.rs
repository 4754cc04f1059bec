//! # E-Shop Domain
//!
//! Business domain types and models for the Xinyutian e-shop client.
//!
//! This crate contains:
//! - Wire types exchanged with the ordering API (auth, products, orders,
//!   dealers, public tracking)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (storage keys, paging defaults)
//!
//! ## Architecture
//! - No dependencies on other e-shop crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
