pub mod chat;
pub mod commands;
pub mod interactive;
pub mod output;

pub use commands::{place_order, show_account, show_price, test_connection};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "punt")]
#[command(version = "0.1.0")]
#[command(about = "Binance USDT-M Futures testnet trading bot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Trading symbol (e.g., BTCUSDT)
    #[arg(long)]
    pub symbol: Option<String>,

    /// Order side (BUY or SELL)
    #[arg(long)]
    pub side: Option<String>,

    /// Order type (MARKET, LIMIT, STOP_LIMIT)
    #[arg(long = "type")]
    pub order_type: Option<String>,

    /// Order quantity
    #[arg(long)]
    pub quantity: Option<String>,

    /// Limit price
    #[arg(long)]
    pub price: Option<String>,

    /// Stop price (for STOP_LIMIT)
    #[arg(long)]
    pub stop: Option<String>,

    /// Run in interactive mode
    #[arg(long)]
    pub interactive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (default: from config/env, usually 8000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Natural-language order entry shell
    Chat,
    /// Show the current price for a symbol
    Price {
        /// Trading symbol (e.g., BTCUSDT)
        symbol: String,
    },
    /// Show account balances
    Account,
    /// Test exchange connectivity and credentials
    Test,
}

/// Untyped order fields as they arrive from flags or prompts.
#[derive(Debug, Clone)]
pub struct RawOrder {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
    pub stop_price: Option<String>,
}
