//! Guided order entry, prompting for each field in turn.

use std::io::{self, Write};

use crate::cli::output::confirm;
use crate::cli::RawOrder;

fn prompt(label: &str) -> io::Result<String> {
    print!("{label} ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_default(label: &str, default: &str) -> io::Result<String> {
    let value = prompt(&format!("{label} [{default}]"))?;
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}

/// Walk through each order field. Returns None if the user cancels.
pub fn run() -> io::Result<Option<RawOrder>> {
    println!("\n--- Binance Futures Trading Bot (Interactive) ---");

    let symbol = prompt_default("Enter symbol (e.g., BTCUSDT):", "BTCUSDT")?;
    let side = prompt_default("BUY or SELL:", "BUY")?;
    let order_type = prompt_default("Order Type (MARKET, LIMIT, STOP_LIMIT):", "MARKET")?;
    let quantity = prompt("Quantity:")?;

    let upper = order_type.to_uppercase();
    let price = if upper == "LIMIT" || upper == "STOP_LIMIT" {
        Some(prompt("Price:")?)
    } else {
        None
    };
    let stop_price = if upper == "STOP_LIMIT" {
        Some(prompt("Trigger Price (Stop Price):")?)
    } else {
        None
    };

    if !confirm("Confirm order placement?") {
        println!("❌ Order cancelled.");
        return Ok(None);
    }

    Ok(Some(RawOrder {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
    }))
}
