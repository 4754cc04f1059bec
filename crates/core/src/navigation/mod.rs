//! Client routes and their access rules

pub mod guard;
pub mod ports;
pub mod routes;

pub use guard::{Navigation, RouteGuard};
pub use routes::{Route, RouteMeta};
