//! # E-Shop Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client core (timeout, no automatic retry)
//! - API client with the bearer/refresh interceptor pair
//! - Ordering API modules (auth, products, orders, dealers, public tracking)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `eshop-core`
//! - Depends on `eshop-common` for token persistence
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiErrorCategory, AuthApi, DealersApi, OrdersApi,
    ProductsApi, PublicApi,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
