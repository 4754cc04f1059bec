//! Order types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl_domain_status_conversions!(OrderStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

/// Line of a placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "crate::utils::money")]
    pub unit_price: f64,
    #[serde(with = "crate::utils::money")]
    pub subtotal: f64,
}

/// Placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_no: String,
    pub dealer_id: Uuid,
    #[serde(default)]
    pub dealer_company: Option<String>,
    pub status: OrderStatus,
    #[serde(with = "crate::utils::money")]
    pub total_amount: f64,
    pub shipping_address: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Line of a new order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Payload of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemCreate>,
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload of `PUT /orders/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Query parameters for `GET /orders`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
}

/// Summary row in [`OrderStats::recent_orders`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: Uuid,
    pub order_no: String,
    pub status: OrderStatus,
    #[serde(with = "crate::utils::money")]
    pub total_amount: f64,
    pub created_at: String,
    #[serde(default)]
    pub dealer_company: Option<String>,
}

/// Response of `GET /orders/stats` (admin dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub status_counts: HashMap<OrderStatus, u64>,
    #[serde(with = "crate::utils::money")]
    pub total_revenue: f64,
    pub today_orders: u64,
    #[serde(default)]
    pub recent_orders: Vec<RecentOrder>,
}

impl OrderStats {
    /// Orders currently in `status` (zero when the server omitted it).
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> u64 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}
