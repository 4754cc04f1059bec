//! Public tracking endpoints
//!
//! Served from the site root without authentication, so these calls use the
//! HTTP core directly and never pass through the interceptor pair.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eshop_core::TrackingGateway;
use eshop_domain::{CatalogEntry, SearchQuery, TrackingOrder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::{ApiRequest, ApiResponse};
use crate::http::HttpClient;

/// `/api/orders/search` and `/api/products` on the public site
#[derive(Clone)]
pub struct PublicApi {
    http_client: Arc<HttpClient>,
    base_url: String,
}

impl PublicApi {
    pub fn new(http_client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self { http_client, base_url: base_url.into() }
    }

    /// Share the transport of an authenticated client, pointed at its
    /// public base URL.
    pub fn from_client(client: &ApiClient) -> Self {
        Self::new(client.http(), client.config().public_base_url.clone())
    }

    /// Shipments whose order id, tracking number, recipient name or phone
    /// contains `query` (case-insensitive, server-side).
    ///
    /// # Errors
    /// Transport, HTTP or decode failures.
    #[instrument(skip_all)]
    pub async fn search_orders(&self, query: &SearchQuery) -> Result<Vec<TrackingOrder>, ApiError> {
        let request = ApiRequest::post("/api/orders/search").json(query)?;
        let orders: Vec<TrackingOrder> = self.send(&request).await?.error_for_status()?.json()?;
        debug!(matches = orders.len(), "Tracking search finished");
        Ok(orders)
    }

    /// One shipment by order id.
    ///
    /// # Errors
    /// `ApiError::Http` (404) for unknown ids.
    pub async fn order(&self, order_id: &str) -> Result<TrackingOrder, ApiError> {
        self.get(&format!("/api/orders/{}", urlencoding::encode(order_id))).await
    }

    /// Products shown on the landing page.
    ///
    /// # Errors
    /// Transport, HTTP or decode failures.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        self.get("/api/products").await
    }

    /// One showcase product.
    ///
    /// # Errors
    /// `ApiError::Http` (404) for unknown ids.
    pub async fn product(&self, product_id: &str) -> Result<CatalogEntry, ApiError> {
        self.get(&format!("/api/products/{}", urlencoding::encode(product_id))).await
    }

    /// Health check for the public site
    ///
    /// # Returns
    ///
    /// `true` if the site is reachable and healthy
    ///
    /// # Errors
    ///
    /// Returns error if the site cannot be reached in time
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let timeout = Duration::from_secs(5);
        let request = ApiRequest::get("/health");

        let response = tokio::time::timeout(timeout, self.send(&request)).await.map_err(|_| {
            warn!("Health check timeout");
            ApiError::Timeout(timeout)
        })?;

        match response {
            Ok(resp) if resp.is_success() => {
                info!("Public site is healthy");
                Ok(true)
            }
            Ok(resp) => {
                warn!(status = resp.status, "Public site returned non-success status");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Err(e)
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(&ApiRequest::get(path)).await?.error_for_status()?.json()
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), request.path());
        let builder = self.http_client.request(Method::clone(request.method()), &url);
        let builder = request.body.apply(builder)?;

        let response = self.http_client.send(builder).await?;
        let status = response.status().as_u16();
        let body = self.http_client.read_body(response).await?;
        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for PublicApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicApi").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

#[async_trait]
impl TrackingGateway for PublicApi {
    async fn search_orders(&self, query: &SearchQuery) -> eshop_domain::Result<Vec<TrackingOrder>> {
        Ok(Self::search_orders(self, query).await?)
    }

    async fn catalog(&self) -> eshop_domain::Result<Vec<CatalogEntry>> {
        Ok(Self::catalog(self).await?)
    }
}
