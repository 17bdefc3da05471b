use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state for API handlers.
///
/// Configuration is read-only after startup; handlers build their own
/// exchange client per request so credential and simulation-mode changes
/// in the environment take effect without a restart.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}
