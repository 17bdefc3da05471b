//! Manual REST client for the futures testnet.
//!
//! Signed requests carry all parameters in the query string: the canonical
//! query is built in insertion order, a millisecond timestamp is appended,
//! and the HMAC-SHA256 signature over that exact string goes last. Every
//! request carries the API key header. Simulation mode short-circuits all
//! network I/O and returns deterministic mock payloads.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::{simulation_mode_from_env, AppConfig, ExchangeConfig, ExchangeCredentials};
use crate::error::{PuntError, Result};
use crate::signing;

const ORDER_ENDPOINT: &str = "/fapi/v1/order";
const ACCOUNT_ENDPOINT: &str = "/fapi/v2/account";
const TICKER_PRICE_ENDPOINT: &str = "/fapi/v1/ticker/price";

#[derive(Clone, Debug)]
pub struct ExchangeClient {
    http: Client,
    base_url: String,
    credentials: Option<ExchangeCredentials>,
    simulation: bool,
    order_timeout: Duration,
}

impl ExchangeClient {
    pub fn new(
        config: &ExchangeConfig,
        credentials: Option<ExchangeCredentials>,
        simulation: bool,
    ) -> Result<Self> {
        if !simulation && credentials.is_none() {
            error!("API key or secret missing (and simulation mode is off)");
            return Err(PuntError::Credentials(
                "BINANCE_API_KEY and BINANCE_API_SECRET must be set (or enable SIMULATION_MODE)"
                    .to_string(),
            ));
        }

        let http = Client::builder()
            .user_agent(concat!("punt/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.info_timeout_ms))
            .build()
            .map_err(|e| PuntError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            simulation,
            order_timeout: Duration::from_millis(config.order_timeout_ms),
        })
    }

    /// Build a client from loaded configuration plus the process environment
    /// (credentials and simulation flag).
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.exchange,
            ExchangeCredentials::from_env(),
            simulation_mode_from_env(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn simulation(&self) -> bool {
        self.simulation
    }

    /// Send a request to the exchange API.
    ///
    /// `params` are serialized into the query string in the given order.
    /// With `signed`, a timestamp and signature are appended.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        signed: bool,
    ) -> Result<Value> {
        self.request_with_timeout(method, endpoint, params, signed, None)
            .await
    }

    async fn request_with_timeout(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        signed: bool,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        if self.simulation {
            info!(
                "[SIMULATION MODE] Intercepted {} {} with params: {:?}",
                method, endpoint, params
            );
            return Ok(self.mock_response(endpoint, params));
        }

        let mut query = signing::canonical_query(params);
        if signed {
            let credentials = self.credentials()?;
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&format!("timestamp={}", signing::timestamp_ms()));
            let signature = signing::sign_query(credentials.api_secret(), &query)?;
            query.push_str(&format!("&signature={}", signature));
        }

        // The URL is assembled by hand so the query string sent matches the
        // signed string byte for byte.
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        };

        // The signed query string never goes to the log; params are enough
        // to reconstruct the request without the signature.
        debug!(
            "Sending {} request to {}{} with params: {:?}",
            method, self.base_url, endpoint, params
        );

        let mut req = self.http.request(method, &url).headers(self.base_headers()?);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("msg")
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
                .unwrap_or_else(|| "Unknown Error".to_string());
            error!("Exchange API error ({}): {}", status.as_u16(), message);
            return Err(PuntError::exchange(status.as_u16(), message));
        }

        Ok(resp.json::<Value>().await?)
    }

    /// POST a signed order placement request.
    pub async fn place_order(&self, params: &[(&str, String)]) -> Result<Value> {
        self.request_with_timeout(
            Method::POST,
            ORDER_ENDPOINT,
            params,
            true,
            Some(self.order_timeout),
        )
        .await
    }

    /// Account information (signed).
    pub async fn account(&self) -> Result<Value> {
        self.request(Method::GET, ACCOUNT_ENDPOINT, &[], true).await
    }

    /// Latest ticker price for a symbol (unsigned).
    pub async fn ticker_price(&self, symbol: &str) -> Result<Value> {
        let params = [("symbol", symbol.trim().to_uppercase())];
        self.request(Method::GET, TICKER_PRICE_ENDPOINT, &params, false)
            .await
    }

    /// Verify connectivity and credentials by fetching account info.
    pub async fn connectivity_check(&self) -> Result<Value> {
        info!("Verifying connectivity with direct REST calls");
        self.account().await
    }

    fn credentials(&self) -> Result<&ExchangeCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            PuntError::Credentials("API credentials are not configured".to_string())
        })
    }

    fn base_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(credentials) = &self.credentials {
            headers.insert(
                HeaderName::from_static("x-mbx-apikey"),
                HeaderValue::from_str(&credentials.api_key).map_err(|e| {
                    PuntError::Credentials(format!("invalid API key header: {}", e))
                })?,
            );
        }
        Ok(headers)
    }

    /// Deterministic mock payloads for simulation mode, shaped per endpoint.
    fn mock_response(&self, endpoint: &str, params: &[(&str, String)]) -> Value {
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        if endpoint.contains(ORDER_ENDPOINT) {
            let order_type = get("type").unwrap_or("MARKET");
            return json!({
                "orderId": signing::timestamp_ms() / 10,
                "symbol": get("symbol").unwrap_or("BTCUSDT"),
                "status": if order_type == "MARKET" { "FILLED" } else { "NEW" },
                "executedQty": get("quantity").unwrap_or("0.00"),
                "avgPrice": get("price").unwrap_or("43000.00"),
                "side": get("side").unwrap_or("BUY"),
                "type": order_type,
            });
        }

        if endpoint.contains(ACCOUNT_ENDPOINT) {
            return json!({
                "assets": [{"asset": "USDT", "walletBalance": "1000.00"}]
            });
        }

        json!({"status": "success", "mock": true})
    }
}
