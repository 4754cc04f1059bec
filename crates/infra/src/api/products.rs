//! Product catalog endpoints

use std::sync::Arc;

use async_trait::async_trait;
use eshop_core::ProductGateway;
use eshop_domain::{
    Categories, ImageUpload, Paginated, Product, ProductCreate, ProductUpdate, ProductsParams,
};
use uuid::Uuid;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// Multipart field the upload endpoint reads the image from.
const IMAGE_FIELD: &str = "file";

/// `/products` endpoints
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: Arc<ApiClient>,
}

impl ProductsApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    /// Transport, HTTP or decode failures.
    pub async fn list(&self, params: &ProductsParams) -> Result<Paginated<Product>, ApiError> {
        self.client.get_with_query("/products", params).await
    }

    /// # Errors
    /// `ApiError::Http` (404) for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Product, ApiError> {
        self.client.get(&format!("/products/{id}")).await
    }

    /// # Errors
    /// `ApiError::Http` (403) for non-admins.
    pub async fn create(&self, product: &ProductCreate) -> Result<Product, ApiError> {
        self.client.post("/products", product).await
    }

    /// # Errors
    /// `ApiError::Http` (403/404).
    pub async fn update(&self, id: Uuid, changes: &ProductUpdate) -> Result<Product, ApiError> {
        self.client.put(&format!("/products/{id}"), changes).await
    }

    /// # Errors
    /// `ApiError::Http` (403/404).
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.execute(ApiRequest::delete(format!("/products/{id}"))).await?;
        Ok(())
    }

    /// Upload a product image as `multipart/form-data`.
    ///
    /// # Errors
    /// `ApiError::Validation` for a malformed content type, `ApiError::Http`
    /// when the server rejects the file.
    pub async fn upload_image(&self, id: Uuid, image: ImageUpload) -> Result<Product, ApiError> {
        let request = ApiRequest::post(format!("/products/{id}/image")).multipart(
            IMAGE_FIELD,
            image.file_name,
            image.content_type,
            image.bytes,
        );
        self.client.execute(request).await?.json()
    }

    /// Distinct category names.
    ///
    /// # Errors
    /// Transport, HTTP or decode failures.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let categories: Categories = self.client.get("/products/categories").await?;
        Ok(categories.categories)
    }
}

#[async_trait]
impl ProductGateway for ProductsApi {
    async fn list_products(
        &self,
        params: &ProductsParams,
    ) -> eshop_domain::Result<Paginated<Product>> {
        Ok(self.list(params).await?)
    }

    async fn categories(&self) -> eshop_domain::Result<Vec<String>> {
        Ok(Self::categories(self).await?)
    }
}
