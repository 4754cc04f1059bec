//! Order endpoints

use std::sync::Arc;

use eshop_domain::{
    Order, OrderCreate, OrderStats, OrderStatus, OrderStatusUpdate, OrdersParams, Paginated,
};
use tracing::info;
use uuid::Uuid;

use super::client::ApiClient;
use super::errors::ApiError;

/// `/orders` endpoints
///
/// Dealers only ever see their own orders; the server scopes the listing.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: Arc<ApiClient>,
}

impl OrdersApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    /// Transport, HTTP or decode failures.
    pub async fn list(&self, params: &OrdersParams) -> Result<Paginated<Order>, ApiError> {
        self.client.get_with_query("/orders", params).await
    }

    /// # Errors
    /// `ApiError::Http` (404) for unknown or foreign orders.
    pub async fn get(&self, id: Uuid) -> Result<Order, ApiError> {
        self.client.get(&format!("/orders/{id}")).await
    }

    /// Place an order.
    ///
    /// # Errors
    /// `ApiError::Http` (400) when stock or minimum quantities are violated.
    pub async fn create(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        let created: Order = self.client.post("/orders", order).await?;
        info!(order_no = %created.order_no, total = created.total_amount, "Order placed");
        Ok(created)
    }

    /// Move an order to `status` (admin).
    ///
    /// # Errors
    /// `ApiError::Http` (400) for transitions the server refuses.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, ApiError> {
        self.client.put(&format!("/orders/{id}/status"), &OrderStatusUpdate { status }).await
    }

    /// Cancel an order; the server answers with the cancelled order.
    ///
    /// # Errors
    /// `ApiError::Http` (400) once the order has shipped.
    pub async fn cancel(&self, id: Uuid) -> Result<Order, ApiError> {
        self.client.delete(&format!("/orders/{id}")).await
    }

    /// Dashboard counters (admin).
    ///
    /// # Errors
    /// Transport, HTTP or decode failures.
    pub async fn stats(&self) -> Result<OrderStats, ApiError> {
        self.client.get("/orders/stats").await
    }
}
