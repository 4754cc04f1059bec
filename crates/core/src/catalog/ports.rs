//! Port interfaces for catalog reads

use async_trait::async_trait;
use eshop_domain::{Paginated, Product, ProductsParams, Result};

/// Product listing endpoints
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// One page of products matching `params`.
    async fn list_products(&self, params: &ProductsParams) -> Result<Paginated<Product>>;

    /// Distinct category names.
    async fn categories(&self) -> Result<Vec<String>>;
}
