//! Dealer administration endpoints (admin only)

use std::sync::Arc;

use eshop_domain::{
    Dealer, DealerCreate, DealerStatus, DealerStatusUpdate, DealerUpdate, DealersParams, Paginated,
};
use uuid::Uuid;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// `/dealers` endpoints
#[derive(Debug, Clone)]
pub struct DealersApi {
    client: Arc<ApiClient>,
}

impl DealersApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &DealersParams) -> Result<Paginated<Dealer>, ApiError> {
        self.client.get_with_query("/dealers", params).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Dealer, ApiError> {
        self.client.get(&format!("/dealers/{id}")).await
    }

    /// Create a dealer together with its login account.
    pub async fn create(&self, dealer: &DealerCreate) -> Result<Dealer, ApiError> {
        self.client.post("/dealers", dealer).await
    }

    pub async fn update(&self, id: Uuid, changes: &DealerUpdate) -> Result<Dealer, ApiError> {
        self.client.put(&format!("/dealers/{id}"), changes).await
    }

    /// Approve or suspend a dealer.
    pub async fn update_status(&self, id: Uuid, status: DealerStatus) -> Result<Dealer, ApiError> {
        self.client.put(&format!("/dealers/{id}/status"), &DealerStatusUpdate { status }).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.execute(ApiRequest::delete(format!("/dealers/{id}"))).await?;
        Ok(())
    }
}
