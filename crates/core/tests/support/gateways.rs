use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eshop_common::{TokenPair, TokenStore};
use eshop_core::{AuthGateway, ProductGateway, TrackingGateway};
use eshop_domain::{
    CatalogEntry, CurrentUser, EshopError, LoginRequest, LoginResponse, Paginated, Product,
    ProductsParams, Result, SearchQuery, TrackingOrder,
};

/// Auth gateway that mimics the infra contract: login stores the pair,
/// logout always clears it.
pub struct MockAuthGateway {
    tokens: TokenStore,
    login: Mutex<Option<Result<LoginResponse>>>,
    me: Mutex<Option<Result<CurrentUser>>>,
    logout_error: Mutex<Option<EshopError>>,
    me_calls: Mutex<usize>,
}

impl MockAuthGateway {
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            login: Mutex::new(None),
            me: Mutex::new(None),
            logout_error: Mutex::new(None),
            me_calls: Mutex::new(0),
        }
    }

    pub fn with_login(self, response: Result<LoginResponse>) -> Self {
        *self.login.lock().unwrap() = Some(response);
        self
    }

    pub fn with_me(self, response: Result<CurrentUser>) -> Self {
        *self.me.lock().unwrap() = Some(response);
        self
    }

    pub fn with_logout_error(self, error: EshopError) -> Self {
        *self.logout_error.lock().unwrap() = Some(error);
        self
    }

    pub fn me_calls(&self) -> usize {
        *self.me_calls.lock().unwrap()
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, _credentials: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .login
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(EshopError::Auth("no login configured".into())))?;
        self.tokens
            .store_pair(&TokenPair::new(&response.access_token, &response.refresh_token))
            .unwrap();
        Ok(response)
    }

    async fn logout(&self) -> Result<()> {
        self.tokens.clear().unwrap();
        match self.logout_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        *self.me_calls.lock().unwrap() += 1;
        self.me
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(EshopError::Auth("no session".into())))
    }
}

/// Product gateway serving queued pages and recording requested params.
#[derive(Default)]
pub struct MockProductGateway {
    pages: Mutex<VecDeque<Result<Paginated<Product>>>>,
    categories: Mutex<Option<Result<Vec<String>>>>,
    requests: Mutex<Vec<ProductsParams>>,
}

impl MockProductGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: Result<Paginated<Product>>) {
        self.pages.lock().unwrap().push_back(page);
    }

    pub fn set_categories(&self, categories: Result<Vec<String>>) {
        *self.categories.lock().unwrap() = Some(categories);
    }

    pub fn requests(&self) -> Vec<ProductsParams> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductGateway for MockProductGateway {
    async fn list_products(&self, params: &ProductsParams) -> Result<Paginated<Product>> {
        self.requests.lock().unwrap().push(params.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EshopError::Network("no page queued".into())))
    }

    async fn categories(&self) -> Result<Vec<String>> {
        self.categories.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Tracking gateway returning canned results.
#[derive(Default)]
pub struct MockTrackingGateway {
    orders: Mutex<Vec<TrackingOrder>>,
    catalog: Mutex<Vec<CatalogEntry>>,
    fail: Mutex<bool>,
    queries: Mutex<Vec<String>>,
}

impl MockTrackingGateway {
    pub fn new(orders: Vec<TrackingOrder>) -> Arc<Self> {
        Arc::new(Self { orders: Mutex::new(orders), ..Self::default() })
    }

    pub fn with_catalog(self: Arc<Self>, entries: Vec<CatalogEntry>) -> Arc<Self> {
        *self.catalog.lock().unwrap() = entries;
        self
    }

    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackingGateway for MockTrackingGateway {
    async fn search_orders(&self, query: &SearchQuery) -> Result<Vec<TrackingOrder>> {
        self.queries.lock().unwrap().push(query.query_str.clone());
        if *self.fail.lock().unwrap() {
            return Err(EshopError::Network("search failed".into()));
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.catalog.lock().unwrap().clone())
    }
}
