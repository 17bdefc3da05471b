//! Order dispatch: maps a validated intent onto the wire-level parameter
//! set for the order endpoint, and formats responses for display.

use serde_json::Value;
use tracing::info;

use crate::domain::{OrderIntent, OrderType};
use crate::error::Result;
use crate::exchange::ExchangeClient;

/// Stateless dispatcher over an injected exchange client.
pub struct OrderDispatcher<'a> {
    client: &'a ExchangeClient,
}

impl<'a> OrderDispatcher<'a> {
    pub fn new(client: &'a ExchangeClient) -> Self {
        Self { client }
    }

    /// Place the order described by `intent`.
    ///
    /// All three order types post to the same signed endpoint; only the
    /// parameter set differs.
    pub async fn place(&self, intent: &OrderIntent) -> Result<Value> {
        info!(
            "Placing {} {} order for {}, qty: {}",
            intent.order_type, intent.side, intent.symbol, intent.quantity
        );

        let params = order_params(intent);
        let response = self.client.place_order(&params).await?;

        info!(
            "{} order placed successfully. OrderID: {}",
            intent.order_type,
            response
                .get("orderId")
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        Ok(response)
    }
}

/// Wire parameters for the order endpoint, in canonical order.
fn order_params(intent: &OrderIntent) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", intent.symbol.clone()),
        ("side", intent.side.to_string()),
        ("type", wire_order_type(intent.order_type).to_string()),
        ("quantity", intent.quantity.to_string()),
    ];

    if let Some(price) = intent.price {
        params.push(("price", price.to_string()));
    }
    if let Some(stop_price) = intent.stop_price {
        params.push(("stopPrice", stop_price.to_string()));
    }
    if intent.order_type.requires_price() {
        // Good Till Cancelled
        params.push(("timeInForce", "GTC".to_string()));
    }

    params
}

/// The futures API has no STOP_LIMIT order type on the wire; stop-limit
/// orders are submitted as type STOP with both price and stopPrice.
fn wire_order_type(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Market => "MARKET",
        OrderType::Limit => "LIMIT",
        OrderType::StopLimit => "STOP",
    }
}

/// Format an order-placement response for display.
pub fn format_report(response: &Value) -> String {
    let empty = response.is_null()
        || response.as_object().map_or(false, |obj| obj.is_empty());
    if empty {
        return "No response from Binance.".to_string();
    }

    format!(
        "OrderId: {}\nStatus: {}\nExecutedQty: {}\nAvgPrice: {}",
        field(response, "orderId", "null"),
        field(response, "status", "null"),
        field(response, "executedQty", "null"),
        field(response, "avgPrice", "0.00"),
    )
}

fn field(response: &Value, key: &str, default: &str) -> String {
    match response.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value) if !value.is_null() => value.to_string(),
        _ => default.to_string(),
    }
}
