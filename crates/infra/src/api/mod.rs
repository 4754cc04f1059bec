//! Client for the ordering API
//!
//! HTTP-based access to the e-shop backend. Authenticated calls share one
//! [`ApiClient`], whose interceptor pair attaches the bearer token and
//! refreshes it transparently on a 401.
//!
//! # Architecture
//!
//! - Uses the [`HttpClient`](crate::http::HttpClient) core (no direct reqwest
//!   calls in the endpoint modules)
//! - One refresh in flight per client; concurrent 401s queue behind it and
//!   are replayed once it settles
//! - No retries beyond that single replay
//! - Endpoint modules implement the `eshop-core` ports

pub mod auth;
pub mod client;
pub mod dealers;
pub mod errors;
pub mod interceptor;
pub mod orders;
pub mod products;
pub mod public;
pub mod request;

pub use auth::AuthApi;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use dealers::DealersApi;
pub use errors::{ApiError, ApiErrorCategory};
pub use interceptor::AuthInterceptorState;
pub use orders::OrdersApi;
pub use products::ProductsApi;
pub use public::PublicApi;
pub use request::{ApiRequest, ApiResponse, RequestBody};
