//! Product catalog store
//!
//! Tracks the current page, filters and the products shown. Pages are
//! 1-based; `load_more` appends the next page for infinite scrolling.

use std::sync::Arc;

use eshop_domain::constants::DEFAULT_PAGE_SIZE;
use eshop_domain::{Paginated, Product, ProductsParams, Result};
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::ports::ProductGateway;

/// Point-in-time copy of the catalog state
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub selected_category: Option<String>,
    pub search_query: String,
}

impl CatalogState {
    fn new(page_size: u32) -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            page_size,
            total_items: 0,
            total_pages: 0,
            selected_category: None,
            search_query: String::new(),
        }
    }

    /// Whether pages remain after the current one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    fn search_filter(&self) -> Option<String> {
        Some(self.search_query.clone()).filter(|q| !q.is_empty())
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Product catalog store
pub struct ProductCatalog {
    gateway: Arc<dyn ProductGateway>,
    state: RwLock<CatalogState>,
}

impl ProductCatalog {
    pub fn new(gateway: Arc<dyn ProductGateway>) -> Self {
        Self::with_page_size(gateway, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(gateway: Arc<dyn ProductGateway>, page_size: u32) -> Self {
        Self { gateway, state: RwLock::new(CatalogState::new(page_size.max(1))) }
    }

    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state.read().clone()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.state.read().categories.clone()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.state.read().has_more()
    }

    /// Replace the shown products with one page.
    ///
    /// Unset fields of `overrides` fall back to the current page, page size
    /// and filters.
    ///
    /// # Errors
    /// The gateway error, after it has been recorded in `error`.
    pub async fn fetch_products(&self, overrides: ProductsParams) -> Result<Paginated<Product>> {
        let params = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            ProductsParams {
                page: overrides.page.or(Some(state.current_page)),
                page_size: overrides.page_size.or(Some(state.page_size)),
                category: overrides.category.or_else(|| state.selected_category.clone()),
                search: overrides.search.or_else(|| state.search_filter()),
            }
        };

        let outcome = self.gateway.list_products(&params).await;

        let mut state = self.state.write();
        state.loading = false;
        match outcome {
            Ok(page) => {
                debug!(page = page.page, items = page.items.len(), "Loaded product page");
                state.products.clone_from(&page.items);
                state.total_items = page.total;
                state.total_pages = page.pages;
                state.current_page = page.page;
                Ok(page)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Refresh the category list. Failures are logged and leave the
    /// previous list in place.
    pub async fn fetch_categories(&self) {
        match self.gateway.categories().await {
            Ok(categories) => self.state.write().categories = categories,
            Err(err) => warn!(error = %err, "Failed to fetch categories"),
        }
    }

    /// Append the next page. Does nothing when no pages remain or a load is
    /// already running; a failure is recorded in `error`.
    ///
    /// Returns the number of products appended.
    pub async fn load_more(&self) -> usize {
        let params = {
            let mut state = self.state.write();
            if !state.has_more() || state.loading {
                return 0;
            }
            state.loading = true;
            state.error = None;
            ProductsParams {
                page: Some(state.current_page + 1),
                page_size: Some(state.page_size),
                category: state.selected_category.clone(),
                search: state.search_filter(),
            }
        };

        let outcome = self.gateway.list_products(&params).await;

        let mut state = self.state.write();
        state.loading = false;
        match outcome {
            Ok(page) => {
                let appended = page.items.len();
                state.products.extend(page.items);
                state.current_page = page.page;
                appended
            }
            Err(err) => {
                warn!(error = %err, "Failed to load more products");
                state.error = Some(err.to_string());
                0
            }
        }
    }

    /// Filter by category (or clear it) and go back to page 1.
    pub fn set_category(&self, category: Option<String>) {
        let mut state = self.state.write();
        state.selected_category = category;
        state.current_page = 1;
    }

    /// Filter by search text and go back to page 1.
    pub fn set_search(&self, query: impl Into<String>) {
        let mut state = self.state.write();
        state.search_query = query.into();
        state.current_page = 1;
    }

    /// Drop products, paging and filters. Categories and page size are kept.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.products.clear();
        state.current_page = 1;
        state.total_items = 0;
        state.total_pages = 0;
        state.selected_category = None;
        state.search_query.clear();
        state.error = None;
    }
}
