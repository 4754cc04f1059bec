//! Domain types and models
//!
//! Wire shapes of the ordering API. Field names follow the JSON payloads
//! (snake_case), identifiers are UUIDs and timestamps are UTC.

pub mod auth;
pub mod dealer;
pub mod order;
pub mod pagination;
pub mod product;
pub mod tracking;

pub use auth::{
    CurrentUser, DealerInfo, LoginRequest, LoginResponse, RefreshRequest, TokenResponse, UserInfo,
    UserRole,
};
pub use dealer::{
    Dealer, DealerCreate, DealerStatus, DealerStatusUpdate, DealerUpdate, DealerUser,
    DealersParams,
};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemCreate, OrderStats, OrderStatus, OrderStatusUpdate,
    OrdersParams, RecentOrder,
};
pub use pagination::Paginated;
pub use product::{Categories, ImageUpload, Product, ProductCreate, ProductUpdate, ProductsParams};
pub use tracking::{CatalogEntry, SearchQuery, TrackingEvent, TrackingOrder};
