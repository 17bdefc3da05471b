use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use zeroize::Zeroize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// REST API base URL (futures testnet by default)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for order placement in milliseconds
    #[serde(default = "default_order_timeout")]
    pub order_timeout_ms: u64,
    /// Timeout for informational lookups (price, account) in milliseconds
    #[serde(default = "default_info_timeout")]
    pub info_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://testnet.binancefuture.com".to_string()
}

fn default_order_timeout() -> u64 {
    10_000
}

fn default_info_timeout() -> u64 {
    3_000
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            order_timeout_ms: default_order_timeout(),
            info_timeout_ms: default_info_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// HTTP API bind port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_port() -> u16 {
    8000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional directory for daily rolling log files
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("exchange.base_url", default_base_url())?
            .set_default("exchange.order_timeout_ms", default_order_timeout())?
            .set_default("exchange.info_timeout_ms", default_info_timeout())?
            .set_default("api.port", default_api_port() as i64)?
            .set_default("logging.level", "info")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Override with environment variables (PUNT__EXCHANGE__BASE_URL, etc.)
            .add_source(
                Environment::with_prefix("PUNT")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.exchange.base_url.starts_with("http") {
            errors.push(format!(
                "exchange.base_url must be an http(s) URL: {}",
                self.exchange.base_url
            ));
        }

        if self.exchange.order_timeout_ms == 0 {
            errors.push("exchange.order_timeout_ms must be positive".to_string());
        }

        if self.exchange.info_timeout_ms == 0 {
            errors.push("exchange.info_timeout_ms must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// API key pair for signed exchange requests.
///
/// The secret never appears in Debug output and is zeroized from memory
/// when the credentials are dropped.
#[derive(Clone)]
pub struct ExchangeCredentials {
    pub api_key: String,
    api_secret: String,
}

impl ExchangeCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Read credentials from BINANCE_API_KEY / BINANCE_API_SECRET.
    ///
    /// Returns `None` when either variable is missing or empty; callers
    /// decide whether that is fatal (it is not in simulation mode).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BINANCE_API_KEY").ok()?;
        let api_secret = std::env::var("BINANCE_API_SECRET").ok()?;

        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return None;
        }

        Some(Self::new(api_key, api_secret))
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for ExchangeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Drop for ExchangeCredentials {
    fn drop(&mut self) {
        self.api_secret.zeroize();
    }
}

/// Read the SIMULATION_MODE flag from the environment.
pub fn simulation_mode_from_env() -> bool {
    std::env::var("SIMULATION_MODE")
        .map(|v| parse_bool_flag(&v))
        .unwrap_or(false)
}

fn parse_bool_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
