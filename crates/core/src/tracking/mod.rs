//! Public order tracking (no sign-in required)

pub mod history;
pub mod ports;
pub mod service;

pub use history::SearchHistory;
pub use service::OrderTracker;
