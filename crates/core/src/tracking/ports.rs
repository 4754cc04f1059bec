//! Port interfaces for the public tracking page
//!
//! These endpoints are served from the site root without authentication.

use async_trait::async_trait;
use eshop_domain::{CatalogEntry, Result, SearchQuery, TrackingOrder};

/// Public order search and product showcase
#[async_trait]
pub trait TrackingGateway: Send + Sync {
    /// Shipments matching a phone number, order id or tracking number.
    async fn search_orders(&self, query: &SearchQuery) -> Result<Vec<TrackingOrder>>;

    /// Products shown on the landing page.
    async fn catalog(&self) -> Result<Vec<CatalogEntry>>;
}
