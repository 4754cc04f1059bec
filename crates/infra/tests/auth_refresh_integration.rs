//! Integration tests for the bearer/refresh interceptor pair
//!
//! **Coverage:**
//! - Concurrent 401s share one refresh and all replay with the new token
//! - A replayed request that is rejected again fails with the 401
//! - Refresh failure rejects every waiter with its cause, clears tokens,
//!   redirects to login
//! - Missing refresh token ends the session without calling the server
//! - Login → 401 → refresh → replay, end to end
//!
//! **Infrastructure:**
//! - WireMock HTTP server standing in for the ordering API
//! - In-memory token store and a recording navigator

#![allow(dead_code)]

mod support;

use std::time::Duration;

use eshop_common::{TokenKind, TokenPair};
use eshop_core::Route;
use eshop_domain::LoginRequest;
use eshop_infra::{ApiError, AuthApi, OrdersApi, ProductsApi};
use futures::future::join_all;
use serde_json::json;
use support::{token_json, user_json, TestClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFRESH_DELAY: Duration = Duration::from_millis(300);

fn categories_body() -> serde_json::Value {
    json!({ "categories": ["甜品", "饮品"] })
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "stale-access", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .with_priority(1)
        .expect(5)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(5)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refresh_token": "refresh-1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_json("fresh-access", "refresh-2"))
                .set_delay(REFRESH_DELAY),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = ProductsApi::new(test_client.client.clone());
    let results = join_all((0..5).map(|_| products.categories())).await;

    for result in results {
        assert_eq!(result.expect("replayed request should succeed"), vec!["甜品", "饮品"]);
    }

    let stored = test_client.tokens.pair().unwrap().expect("refreshed pair stored");
    assert_eq!(stored, TokenPair::new("fresh-access", "refresh-2"));
    assert!(!test_client.client.interceptor().is_refreshing());
    assert_eq!(test_client.client.interceptor().queued(), 0);
    assert!(test_client.navigator.routes().is_empty());
}

#[tokio::test]
async fn replayed_request_rejected_again_returns_unauthorized() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "stale-access", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Forbidden scope"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("fresh-access", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    let orders = OrdersApi::new(test_client.client.clone());
    let result = orders.stats().await;

    match result {
        Err(err @ ApiError::Http { status: 401, .. }) => {
            assert_eq!(err.detail(), "Forbidden scope");
        }
        other => panic!("expected pass-through 401, got {other:?}"),
    }

    // The refresh itself worked, so the session stays.
    assert!(test_client.tokens.has_access_token().unwrap());
    assert!(test_client.navigator.routes().is_empty());
}

#[tokio::test]
async fn refresh_failure_rejects_all_waiters_and_redirects_to_login() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "stale-access", "revoked-refresh");

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Invalid refresh token"}))
                .set_delay(REFRESH_DELAY),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = ProductsApi::new(test_client.client.clone());
    let results = join_all((0..3).map(|_| products.categories())).await;

    for result in results {
        match result {
            Err(ApiError::RefreshFailed(cause)) => {
                assert_eq!(cause.status(), Some(401));
                assert_eq!(cause.detail(), "Invalid refresh token");
            }
            other => panic!("expected the refresh failure, got {other:?}"),
        }
    }

    assert!(test_client.tokens.pair().unwrap().is_none());
    assert!(test_client.tokens.get(TokenKind::Refresh).unwrap().is_none());
    assert_eq!(test_client.navigator.routes(), vec![Route::Login]);
    assert!(!test_client.client.interceptor().is_refreshing());
}

#[tokio::test]
async fn unreachable_refresh_endpoint_is_reported_as_the_cause() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "stale-access", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = OrdersApi::new(test_client.client.clone()).stats().await.unwrap_err();

    let cause = err.refresh_cause().expect("refresh cause");
    assert_eq!(cause.status(), Some(503));
    assert_eq!(cause.detail(), "upstream unavailable");
    assert!(test_client.tokens.pair().unwrap().is_none());
    assert_eq!(test_client.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn missing_refresh_token_ends_session_without_refresh_call() {
    let server = MockServer::start().await;
    let test_client = TestClient::new(&server);
    test_client.tokens.set(TokenKind::Access, "stale-access").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("x", "y")))
        .expect(0)
        .mount(&server)
        .await;

    let orders = OrdersApi::new(test_client.client.clone());
    let result = orders.stats().await;

    assert!(matches!(result, Err(ApiError::Http { status: 401, .. })));
    assert!(!test_client.tokens.has_access_token().unwrap());
    assert_eq!(test_client.navigator.routes(), vec![Route::Login]);
    assert!(!test_client.client.interceptor().is_refreshing());
}

#[tokio::test]
async fn forbidden_is_not_treated_as_expired_session() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "dealer-access", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Admin only"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("x", "y")))
        .expect(0)
        .mount(&server)
        .await;

    let orders = OrdersApi::new(test_client.client.clone());
    let result = orders.stats().await;

    assert!(matches!(result, Err(ApiError::Http { status: 403, .. })));
    assert!(test_client.tokens.has_access_token().unwrap());
    assert!(test_client.navigator.routes().is_empty());
}

#[tokio::test]
async fn login_then_expired_token_refreshes_and_replays() {
    let server = MockServer::start().await;
    let test_client = TestClient::new(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "dealer01", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer",
            "user": user_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refresh_token": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("access-2", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthApi::new(test_client.client.clone());
    let login = auth.login(&LoginRequest::new("dealer01", "secret")).await.unwrap();
    assert_eq!(login.user.username, "dealer01");

    let products = ProductsApi::new(test_client.client.clone());
    let categories = products.categories().await.unwrap();
    assert_eq!(categories, vec!["甜品", "饮品"]);

    let stored = test_client.tokens.pair().unwrap().expect("pair stored");
    assert_eq!(stored, TokenPair::new("access-2", "refresh-2"));
}

#[tokio::test]
async fn session_can_refresh_again_after_an_episode_settles() {
    let server = MockServer::start().await;
    let test_client = TestClient::logged_in(&server, "access-1", "refresh-1");

    for (stale, fresh, refresh_in, refresh_out) in [
        ("access-1", "access-2", "refresh-1", "refresh-2"),
        ("access-2", "access-3", "refresh-2", "refresh-3"),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/orders/stats"))
            .and(header("authorization", format!("Bearer {stale}").as_str()))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(body_json(json!({"refresh_token": refresh_in})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json(fresh, refresh_out)))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_counts": {"pending": 1},
            "total_revenue": "18.50",
            "today_orders": 1,
            "recent_orders": []
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/orders/stats"))
        .and(header("authorization", "Bearer access-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_counts": {},
            "total_revenue": 0,
            "today_orders": 0,
            "recent_orders": []
        })))
        .mount(&server)
        .await;

    let orders = OrdersApi::new(test_client.client.clone());
    let first = orders.stats().await.unwrap();
    assert_eq!(first.today_orders, 1);

    let second = orders.stats().await.unwrap();
    assert_eq!(second.today_orders, 0);

    let stored = test_client.tokens.pair().unwrap().expect("pair stored");
    assert_eq!(stored, TokenPair::new("access-3", "refresh-3"));
}
