//! Implementations of the `punt` subcommands and the one-shot order flow.

use serde_json::Value;
use tabled::Tabled;
use tracing::{error, info};

use crate::cli::output::{print_error, print_success, print_table};
use crate::cli::RawOrder;
use crate::config::AppConfig;
use crate::dispatch::{format_report, OrderDispatcher};
use crate::domain::OrderIntent;
use crate::error::{PuntError, Result};
use crate::exchange::ExchangeClient;
use crate::validation;

fn print_summary(intent: &OrderIntent) {
    println!("\n===== ORDER REQUEST =====");
    println!("Symbol: {}", intent.symbol);
    println!("Side: {}", intent.side);
    println!("Type: {}", intent.order_type);
    println!("Quantity: {}", intent.quantity);
    if let Some(price) = intent.price {
        println!("Price: {}", price);
    }
    if let Some(stop_price) = intent.stop_price {
        println!("Trigger: {}", stop_price);
    }
    println!("{}", "-".repeat(25));
}

/// Validate and place a single order described by raw fields.
///
/// Failures are printed rather than propagated so a rejected order leaves
/// the process with a clean exit.
pub async fn place_order(config: &AppConfig, raw: &RawOrder) {
    // 1. Validate
    let intent = match validation::validate_order(
        &raw.symbol,
        &raw.side,
        &raw.order_type,
        &raw.quantity,
        raw.price.as_deref(),
        raw.stop_price.as_deref(),
    ) {
        Ok(intent) => intent,
        Err(PuntError::Validation(message)) => {
            println!("{}", message);
            error!("Validation failed: {}", message);
            return;
        }
        Err(e) => {
            println!("{}", e);
            error!("Validation failed: {}", e);
            return;
        }
    };

    // 2. Request summary
    print_summary(&intent);

    // 3. Connect and place
    let client = match ExchangeClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            println!("\n❌ UNEXPECTED ERROR: {}", e);
            error!("Unexpected Error: {}", e);
            return;
        }
    };

    match OrderDispatcher::new(&client).place(&intent).await {
        Ok(response) => {
            // 4. Show response
            println!("{}", format_report(&response));
            println!("\n✅ SUCCESS");
            info!(
                "Response received: {}",
                response
                    .get("status")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
            );
        }
        Err(PuntError::Exchange { message, .. }) => {
            println!("\n❌ API ERROR: {}", message);
            error!("API Error: {}", message);
        }
        Err(e) => {
            println!("\n❌ UNEXPECTED ERROR: {}", e);
            error!("Unexpected Error: {}", e);
        }
    }
}

/// Print the current ticker price for a symbol.
pub async fn show_price(client: &ExchangeClient, symbol: &str) -> Result<()> {
    let ticker = client.ticker_price(symbol).await?;
    let name = ticker
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| symbol.to_uppercase());
    let price = ticker.get("price").and_then(Value::as_str).unwrap_or("0.00");
    println!("{}: {}", name, price);
    Ok(())
}

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Wallet Balance")]
    wallet_balance: String,
}

/// Print wallet balances from the signed account endpoint.
pub async fn show_account(client: &ExchangeClient) -> Result<()> {
    let account = client.account().await?;

    let assets = account
        .get("assets")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let rows: Vec<AssetRow> = assets
        .iter()
        .map(|asset| AssetRow {
            asset: text_field(asset, "asset"),
            wallet_balance: text_field(asset, "walletBalance"),
        })
        .collect();

    print_table(&rows);

    let usdt = rows
        .iter()
        .find(|row| row.asset == "USDT")
        .map(|row| row.wallet_balance.clone())
        .unwrap_or_else(|| "0.00".to_string());
    println!("USDT balance: {}", usdt);
    Ok(())
}

/// Verify connectivity and credentials via the signed account endpoint.
pub async fn test_connection(client: &ExchangeClient) -> Result<()> {
    println!("Testing connection to {}...", client.base_url());

    match client.connectivity_check().await {
        Ok(_) => {
            print_success("✅ Connection Successful!");
            Ok(())
        }
        Err(e) => {
            print_error(&format!("❌ Connection Failed: {}", e));
            Err(e)
        }
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => String::new(),
    }
}
