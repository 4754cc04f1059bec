//! Order tracking service - public search workflow

use std::sync::Arc;

use eshop_domain::{CatalogEntry, EshopError, Result, SearchQuery, TrackingOrder};
use tracing::{debug, warn};

use super::history::SearchHistory;
use super::ports::TrackingGateway;

/// Public order tracking service
pub struct OrderTracker {
    gateway: Arc<dyn TrackingGateway>,
    history: Arc<SearchHistory>,
}

impl OrderTracker {
    pub fn new(gateway: Arc<dyn TrackingGateway>, history: Arc<SearchHistory>) -> Self {
        Self { gateway, history }
    }

    #[must_use]
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Search shipments by phone number, order id or tracking number.
    ///
    /// The trimmed query is recorded in the search history before the
    /// request is sent, so failed searches are remembered too.
    ///
    /// # Errors
    /// `Validation` for a blank query; otherwise the gateway error.
    pub async fn search(&self, query: &str) -> Result<Vec<TrackingOrder>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(EshopError::Validation("请输入查询内容".into()));
        }

        if let Err(err) = self.history.record(query) {
            warn!(error = %err, "Failed to save search history");
        }

        let orders =
            self.gateway.search_orders(&SearchQuery { query_str: query.to_string() }).await?;
        debug!(matches = orders.len(), "Tracking search finished");
        Ok(orders)
    }

    /// Products for the landing page.
    ///
    /// # Errors
    /// Propagates the gateway error.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        self.gateway.catalog().await
    }
}
