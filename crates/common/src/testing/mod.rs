//! Testing utilities and helpers
//!
//! - **[`mocks`]**: key/value store double that records calls and can be
//!   switched into a failing mode
//!
//! Enabled for downstream crates through the `test-utils` feature.

pub mod mocks;

pub use mocks::MockKeyValueStore;
