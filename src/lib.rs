pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod logging;
pub mod parser;
pub mod signing;
pub mod validation;

pub use config::{AppConfig, ExchangeCredentials};
pub use dispatch::OrderDispatcher;
pub use domain::{OrderIntent, OrderType, Side};
pub use error::{PuntError, Result};
pub use exchange::ExchangeClient;
