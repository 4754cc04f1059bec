//! Application commands
//!
//! Each command is the unit a UI action maps to: it drives the stores and
//! API modules held by [`crate::AppContext`] and logs its outcome.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod navigation;
pub mod orders;
pub mod tracking;

pub use admin::*;
pub use auth::*;
pub use cart::*;
pub use catalog::*;
pub use health::*;
pub use navigation::*;
pub use orders::*;
pub use tracking::*;
