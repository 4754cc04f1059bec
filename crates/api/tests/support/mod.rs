//! Shared fixtures for the command suites.

use std::sync::Arc;

use eshop_api::AppContext;
use eshop_common::{KeyValueStore, MemoryStore, TokenPair};
use eshop_domain::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Context against `server` with in-memory state. Also returns the state
/// store so tests can inspect what was persisted.
pub fn context_for(server: &MockServer) -> (AppContext, Arc<MemoryStore>) {
    let state = Arc::new(MemoryStore::new());
    let backend = Arc::clone(&state) as Arc<dyn KeyValueStore>;
    let ctx = context_with_storage(server, Arc::clone(&backend), backend);
    (ctx, state)
}

/// Context against `server` over explicit state and token backends.
pub fn context_with_storage(
    server: &MockServer,
    state: Arc<dyn KeyValueStore>,
    token_backend: Arc<dyn KeyValueStore>,
) -> AppContext {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.api.public_base_url = server.uri();
    config.api.use_system_proxy = false;
    config.storage.namespace = "shop.test".into();

    AppContext::new_with_storage(config, state, token_backend).expect("context should build")
}

/// Context whose token store already holds a pair.
pub fn logged_in_context(server: &MockServer, access: &str, refresh: &str) -> AppContext {
    let (ctx, _state) = context_for(server);
    ctx.tokens.store_pair(&TokenPair::new(access, refresh)).expect("tokens stored");
    ctx
}

pub fn user_json(role: &str) -> Value {
    let dealer = if role == "dealer" {
        json!({
            "id": "0b6f2f7c-1111-4b0e-9d7b-2d8f2c3e9a10",
            "company_name": "甜品批发",
            "contact_name": "王五",
            "phone": "13812345678",
            "address": null,
            "status": "approved"
        })
    } else {
        Value::Null
    };

    json!({
        "id": "7d5c3a52-4f5e-4b0e-9d7b-2d8f2c3e9a10",
        "username": format!("{role}01"),
        "email": format!("{role}01@example.com"),
        "role": role,
        "is_active": true,
        "dealer": dealer
    })
}

pub fn current_user_json(role: &str) -> Value {
    let mut user = user_json(role);
    user["created_at"] = json!("2024-03-01T08:00:00Z");
    user["updated_at"] = json!("2024-03-01T08:00:00Z");
    user
}

pub fn login_json(role: &str) -> Value {
    json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "token_type": "bearer",
        "user": user_json(role)
    })
}

pub fn product_json(id: &str, price: &str, stock: u32) -> Value {
    json!({
        "id": id,
        "name": "芒果班戟",
        "category": "甜品",
        "price": price,
        "unit": "盒",
        "min_order_quantity": 1,
        "description": null,
        "image_url": null,
        "stock": stock,
        "is_active": true,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z"
    })
}

pub fn order_json(id: &str, status: &str, total: &str) -> Value {
    json!({
        "id": id,
        "order_no": "XYT20240301001",
        "dealer_id": "0b6f2f7c-1111-4b0e-9d7b-2d8f2c3e9a10",
        "dealer_company": "甜品批发",
        "status": status,
        "total_amount": total,
        "shipping_address": "上海市浦东新区1号",
        "notes": null,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z",
        "items": []
    })
}
