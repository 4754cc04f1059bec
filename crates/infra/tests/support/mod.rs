//! Shared fixtures for the API client integration suites.

use std::sync::Arc;

use eshop_common::{MemoryStore, TokenPair, TokenStore};
use eshop_core::{Navigator, Route};
use eshop_infra::{ApiClient, ApiClientConfig};
use parking_lot::Mutex;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Navigator that remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// API client wired to a mock server, with handles on its collaborators.
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub tokens: TokenStore,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestClient {
    /// Client with an empty in-memory token store.
    pub fn new(server: &MockServer) -> Self {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        let navigator = Arc::new(RecordingNavigator::default());
        let config = ApiClientConfig {
            base_url: format!("{}/api", server.uri()),
            public_base_url: server.uri(),
            use_system_proxy: false,
            ..Default::default()
        };
        let client = ApiClient::builder()
            .config(config)
            .tokens(tokens.clone())
            .navigator(Arc::clone(&navigator) as Arc<dyn Navigator>)
            .build()
            .expect("api client should build");

        Self { client: Arc::new(client), tokens, navigator }
    }

    /// Client that starts out logged in with `access`/`refresh`.
    pub fn logged_in(server: &MockServer, access: &str, refresh: &str) -> Self {
        let test_client = Self::new(server);
        test_client
            .tokens
            .store_pair(&TokenPair::new(access, refresh))
            .expect("token pair should be stored");
        test_client
    }
}

pub fn token_json(access: &str, refresh: &str) -> Value {
    json!({ "access_token": access, "refresh_token": refresh, "token_type": "bearer" })
}

pub fn user_json() -> Value {
    json!({
        "id": "7d5c3a52-4f5e-4b0e-9d7b-2d8f2c3e9a10",
        "username": "dealer01",
        "email": "d01@example.com",
        "role": "dealer",
        "is_active": true,
        "dealer": null
    })
}

pub fn product_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "甜品",
        "price": "18.50",
        "unit": "盒",
        "min_order_quantity": 1,
        "description": null,
        "image_url": null,
        "stock": 40,
        "is_active": true,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z"
    })
}

pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "order_no": "XYT20240301001",
        "dealer_id": "0b6f2f7c-1111-4b0e-9d7b-2d8f2c3e9a10",
        "dealer_company": "甜品批发",
        "status": status,
        "total_amount": "37.00",
        "shipping_address": "上海市浦东新区1号",
        "notes": null,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z",
        "items": []
    })
}

pub fn page_json(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "items": items, "total": total, "page": 1, "page_size": 20, "pages": 1 })
}
