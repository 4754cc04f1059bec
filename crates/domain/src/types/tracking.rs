//! Public order tracking types
//!
//! Served without authentication from the site root (`/api/orders/search`,
//! `/api/products`). Dates are display strings chosen by the courier feed.

use serde::{Deserialize, Serialize};

use crate::utils::phone::mask_phone;

/// Query body of `POST /api/orders/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query_str: String,
}

/// One courier scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub time: String,
    pub location: String,
    pub status: String,
}

/// Shipment found by phone number, order id or tracking number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOrder {
    pub order_id: String,
    pub tracking_number: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub product_name: String,
    pub status: String,
    pub courier: String,
    pub shipping_date: String,
    pub estimated_delivery: String,
    /// Oldest scan first, as delivered by the courier feed
    #[serde(default)]
    pub tracking_history: Vec<TrackingEvent>,
}

impl TrackingOrder {
    /// Recipient phone with the middle digits hidden.
    #[must_use]
    pub fn masked_phone(&self) -> String {
        mask_phone(&self.recipient_phone)
    }

    /// Scans ordered for display, latest first.
    pub fn history_newest_first(&self) -> impl Iterator<Item = &TrackingEvent> {
        self.tracking_history.iter().rev()
    }

    /// Most recent scan, if any.
    #[must_use]
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.tracking_history.last()
    }
}

/// Product card on the public landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub product_id: String,
    pub name: String,
    pub category: String,
    #[serde(with = "crate::utils::money")]
    pub price: f64,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
}
