use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /place_order`.
///
/// Numeric fields are taken as raw JSON and converted downstream so that a
/// missing or malformed quantity surfaces as a 400 with the validator's
/// message instead of a deserialization rejection. String and number forms
/// are both accepted (the chat front end sends parsed amounts as strings).
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub side: String,
    #[serde(default, rename = "type")]
    pub order_type: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub stop_price: Value,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderPlacedResponse {
    pub success: bool,
    pub message: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub success: bool,
    pub wallet_balance: String,
    pub assets_count: usize,
}
