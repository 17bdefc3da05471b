use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::api::{
    state::AppState,
    types::{AccountResponse, ChatRequest, OrderPlacedResponse, PlaceOrderRequest},
};
use crate::dispatch::{format_report, OrderDispatcher};
use crate::error::PuntError;
use crate::exchange::ExchangeClient;
use crate::{parser, validation};

/// Map crate errors onto the HTTP surface: validation failures are the
/// caller's fault (400), everything else is an upstream failure (502).
fn error_response(err: PuntError) -> (StatusCode, String) {
    match err {
        PuntError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        other => {
            error!("API Error: {}", other);
            (StatusCode::BAD_GATEWAY, format!("API Error: {}", other))
        }
    }
}

/// Raw text form of a JSON field for the validator. Strings pass through
/// unquoted; numbers keep their JSON rendering.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// POST /place_order
pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> std::result::Result<Json<OrderPlacedResponse>, (StatusCode, String)> {
    let quantity = field_text(&req.quantity).unwrap_or_default();
    let price = field_text(&req.price);
    let stop_price = field_text(&req.stop_price);

    let intent = validation::validate_order(
        &req.symbol,
        &req.side,
        &req.order_type,
        &quantity,
        price.as_deref(),
        stop_price.as_deref(),
    )
    .map_err(error_response)?;

    let client = ExchangeClient::from_config(&state.config).map_err(error_response)?;
    let response = OrderDispatcher::new(&client)
        .place(&intent)
        .await
        .map_err(error_response)?;

    Ok(Json(OrderPlacedResponse {
        success: true,
        message: "Order placed successfully!".to_string(),
        details: format_report(&response),
    }))
}

/// GET /account
pub async fn get_account(
    State(state): State<AppState>,
) -> std::result::Result<Json<AccountResponse>, (StatusCode, String)> {
    let client = ExchangeClient::from_config(&state.config).map_err(error_response)?;
    let account = client.account().await.map_err(error_response)?;

    let assets = account
        .get("assets")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let wallet_balance = assets
        .iter()
        .find(|asset| asset.get("asset").and_then(Value::as_str) == Some("USDT"))
        .and_then(|asset| asset.get("walletBalance"))
        .and_then(Value::as_str)
        .unwrap_or("0.00")
        .to_string();

    Ok(Json(AccountResponse {
        success: true,
        wallet_balance,
        assets_count: assets.len(),
    }))
}

/// GET /price/:symbol
pub async fn get_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> std::result::Result<Json<Value>, (StatusCode, String)> {
    let client = ExchangeClient::from_config(&state.config).map_err(error_response)?;
    let ticker = client.ticker_price(&symbol).await.map_err(error_response)?;
    Ok(Json(ticker))
}

/// POST /chat
///
/// Natural-language order entry: parses the text, validates the resulting
/// intent and places it, echoing the interpretation back in `message`.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> std::result::Result<Json<OrderPlacedResponse>, (StatusCode, String)> {
    let Some(intent) = parser::parse(&req.text) else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Could not parse command. Use: [action] [quantity] [symbol] at [price|market]"
                .to_string(),
        ));
    };
    validation::validate_intent(&intent).map_err(error_response)?;

    let client = ExchangeClient::from_config(&state.config).map_err(error_response)?;
    let response = OrderDispatcher::new(&client)
        .place(&intent)
        .await
        .map_err(error_response)?;

    Ok(Json(OrderPlacedResponse {
        success: true,
        message: format!(
            "{} {} {} ({})",
            intent.side, intent.quantity, intent.symbol, intent.order_type
        ),
        details: format_report(&response),
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
