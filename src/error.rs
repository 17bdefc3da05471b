use thiserror::Error;

/// Main error type for the order client
#[derive(Error, Debug)]
pub enum PuntError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Credentials error: {0}")]
    Credentials(String),

    // Input validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Remote exchange errors
    #[error("API error ({status}): {message}")]
    Exchange { status: u16, message: String },

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl PuntError {
    pub fn exchange(status: u16, message: impl Into<String>) -> Self {
        PuntError::Exchange {
            status,
            message: message.into(),
        }
    }
}

/// Result type alias for PuntError
pub type Result<T> = std::result::Result<T, PuntError>;
