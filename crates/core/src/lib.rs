//! # E-Shop Core
//!
//! Pure client-side business logic - no HTTP or platform code.
//!
//! This crate contains:
//! - State stores (auth session, cart, product catalog, search history)
//! - Port interfaces (traits) the infra layer implements
//! - Route access rules for the dealer and admin areas
//!
//! ## Architecture Principles
//! - Only depends on `eshop-common` and `eshop-domain`
//! - All network access via async port traits
//! - Store state lives behind short synchronous locks, never held across
//!   an `.await`

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod errors;
pub mod navigation;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use auth::ports::AuthGateway;
pub use auth::AuthSession;
pub use cart::{CartItem, CartStore};
pub use catalog::ports::ProductGateway;
pub use catalog::{CatalogState, ProductCatalog};
pub use errors::IntoEshopError;
pub use navigation::ports::Navigator;
pub use navigation::{Navigation, Route, RouteGuard, RouteMeta};
pub use tracking::ports::TrackingGateway;
pub use tracking::{OrderTracker, SearchHistory};
