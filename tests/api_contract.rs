//! HTTP contract tests for the API surface, run against the router in
//! simulation mode. No network access.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use punt::api::{create_router, AppState};
use punt::config::AppConfig;
use serde_json::{json, Value};
use std::{
    env,
    sync::{Arc, Mutex, OnceLock},
};
use tower::ServiceExt;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

#[derive(Default)]
struct EnvOverride {
    previous: Vec<(String, Option<String>)>,
}

impl EnvOverride {
    fn set(&mut self, key: &str, value: &str) {
        self.remember(key);
        unsafe { env::set_var(key, value) };
    }

    fn remember(&mut self, key: &str) {
        if !self.previous.iter().any(|(existing, _)| existing == key) {
            self.previous.push((key.to_string(), env::var(key).ok()));
        }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        for (key, value) in self.previous.iter().rev() {
            if let Some(value) = value {
                unsafe { env::set_var(key, value) };
            } else {
                unsafe { env::remove_var(key) };
            }
        }
    }
}

fn test_app() -> Router {
    create_router(AppState::new(Arc::new(AppConfig::default())))
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String) {
    let request_builder = Request::builder().method(method).uri(uri);

    let request = if let Some(payload) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("failed to build json request")
    } else {
        request_builder
            .body(Body::empty())
            .expect("failed to build empty request")
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8_lossy(&bytes).to_string();

    (status, body)
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["status"], "healthy");
}

#[tokio::test]
async fn place_market_order_succeeds() {
    let _guard = env_lock().lock().expect("failed to acquire env lock");
    let mut env = EnvOverride::default();
    env.set("SIMULATION_MODE", "true");

    let app = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/place_order",
        Some(json!({
            "symbol": "BTCUSDT",
            "side": "BUY",
            "type": "MARKET",
            "quantity": "0.002"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "Order placed successfully!");
    let details = payload["details"].as_str().expect("details string");
    assert!(details.contains("Status: FILLED"), "details: {details}");
    assert!(details.contains("ExecutedQty: 0.002"), "details: {details}");
}

#[tokio::test]
async fn place_limit_order_accepts_lowercase_fields() {
    let _guard = env_lock().lock().expect("failed to acquire env lock");
    let mut env = EnvOverride::default();
    env.set("SIMULATION_MODE", "true");

    let app = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/place_order",
        Some(json!({
            "symbol": "ethusdt",
            "side": "sell",
            "type": "limit",
            "quantity": 0.5,
            "price": 2500
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    let payload: Value = serde_json::from_str(&body).expect("json body");
    let details = payload["details"].as_str().expect("details string");
    assert!(details.contains("Status: NEW"), "details: {details}");
}

#[tokio::test]
async fn place_order_rejects_bad_quantity() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/place_order",
        Some(json!({
            "symbol": "BTCUSDT",
            "side": "BUY",
            "type": "MARKET",
            "quantity": "abc"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Quantity must be a valid number and greater than 0");
}

#[tokio::test]
async fn place_order_requires_price_for_limit() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/place_order",
        Some(json!({
            "symbol": "BTCUSDT",
            "side": "BUY",
            "type": "LIMIT",
            "quantity": "0.01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "LIMIT orders require a price");
}

#[tokio::test]
async fn place_order_rejects_unknown_side() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/place_order",
        Some(json!({
            "symbol": "BTCUSDT",
            "side": "HOLD",
            "type": "MARKET",
            "quantity": "0.01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Side must be either BUY or SELL");
}

#[tokio::test]
async fn chat_places_parsed_order() {
    let _guard = env_lock().lock().expect("failed to acquire env lock");
    let mut env = EnvOverride::default();
    env.set("SIMULATION_MODE", "true");

    let app = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/chat",
        Some(json!({ "text": "buy 0.01 btc at market" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "BUY 0.01 BTCUSDT (MARKET)");
    let details = payload["details"].as_str().expect("details string");
    assert!(details.contains("Status: FILLED"), "details: {details}");
}

#[tokio::test]
async fn chat_rejects_unparseable_text() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/chat",
        Some(json!({ "text": "what is the weather" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Could not parse command. Use: [action] [quantity] [symbol] at [price|market]"
    );
}

#[tokio::test]
async fn account_returns_simulated_balance() {
    let _guard = env_lock().lock().expect("failed to acquire env lock");
    let mut env = EnvOverride::default();
    env.set("SIMULATION_MODE", "true");

    let app = test_app();
    let (status, body) = send_json(&app, Method::GET, "/account", None).await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["success"], true);
    assert_eq!(payload["wallet_balance"], "1000.00");
    assert_eq!(payload["assets_count"], 1);
}

#[tokio::test]
async fn price_passes_exchange_response_through() {
    let _guard = env_lock().lock().expect("failed to acquire env lock");
    let mut env = EnvOverride::default();
    env.set("SIMULATION_MODE", "true");

    let app = test_app();
    let (status, body) = send_json(&app, Method::GET, "/price/BTCUSDT", None).await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    let payload: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(payload["status"], "success");
}
