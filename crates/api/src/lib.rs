//! # E-Shop API
//!
//! Application layer of the Xinyutian e-shop client.
//!
//! This crate contains:
//! - Commands (UI action → stores and API modules)
//! - Application context (dependency injection)
//! - The navigator adapter that records the displayed route
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod adapters;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
