//! Input validation for order parameters.
//!
//! Raw user input (CLI flags, API body fields, parsed chat commands) is
//! normalized and range-checked here before anything reaches the exchange.
//! Each field is validated independently; the first failure wins.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{OrderIntent, OrderType, Side};
use crate::error::{PuntError, Result};

/// Validate and normalize a trading symbol (e.g. BTCUSDT).
///
/// An unusual quote-currency suffix is logged but not rejected.
pub fn validate_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(PuntError::Validation(
            "Symbol must be a non-empty string (e.g., BTCUSDT)".to_string(),
        ));
    }

    // Simple check for USDT-M futures pairs
    if !symbol.ends_with("USDT") && !symbol.ends_with("BUSD") {
        warn!(
            "Symbol {} might not be a valid USDT-M or BUSD-M futures pair",
            symbol
        );
    }

    Ok(symbol)
}

/// Validate the order side (BUY or SELL).
pub fn validate_side(raw: &str) -> Result<Side> {
    Side::from_str(raw)
}

/// Validate the order type.
pub fn validate_order_type(raw: &str) -> Result<OrderType> {
    OrderType::from_str(raw)
}

fn parse_positive(field: &str, raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| {
        PuntError::Validation(format!(
            "{} must be a valid number and greater than 0",
            field
        ))
    })?;

    if value <= Decimal::ZERO {
        return Err(PuntError::Validation(format!("{} must be positive", field)));
    }

    Ok(value)
}

/// Validate that the quantity is a positive number.
pub fn validate_quantity(raw: &str) -> Result<Decimal> {
    parse_positive("Quantity", raw)
}

/// Validate that the price is a positive number.
pub fn validate_price(raw: &str) -> Result<Decimal> {
    parse_positive("Price", raw)
}

/// Validate that the stop (trigger) price is a positive number.
pub fn validate_stop_price(raw: &str) -> Result<Decimal> {
    parse_positive("Stop price", raw)
}

/// Comprehensive validation of all order parameters.
///
/// A price is required for LIMIT and STOP_LIMIT, a stop price only for
/// STOP_LIMIT. Extraneous prices on MARKET orders are dropped.
pub fn validate_order(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
    stop_price: Option<&str>,
) -> Result<OrderIntent> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;

    let price = if order_type.requires_price() {
        let raw = price.ok_or_else(|| {
            PuntError::Validation(format!("{} orders require a price", order_type))
        })?;
        Some(validate_price(raw)?)
    } else {
        None
    };

    let stop_price = if order_type.requires_stop_price() {
        let raw = stop_price.ok_or_else(|| {
            PuntError::Validation("STOP_LIMIT orders require a stop price".to_string())
        })?;
        Some(validate_stop_price(raw)?)
    } else {
        None
    };

    Ok(OrderIntent {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
    })
}

/// Re-check an already-typed intent (used for parsed chat commands).
pub fn validate_intent(intent: &OrderIntent) -> Result<()> {
    if intent.symbol.trim().is_empty() {
        return Err(PuntError::Validation(
            "Symbol must be a non-empty string (e.g., BTCUSDT)".to_string(),
        ));
    }

    if intent.quantity <= Decimal::ZERO {
        return Err(PuntError::Validation("Quantity must be positive".to_string()));
    }

    match intent.price {
        Some(price) if price <= Decimal::ZERO => {
            return Err(PuntError::Validation("Price must be positive".to_string()));
        }
        None if intent.order_type.requires_price() => {
            return Err(PuntError::Validation(format!(
                "{} orders require a price",
                intent.order_type
            )));
        }
        _ => {}
    }

    match intent.stop_price {
        Some(stop) if stop <= Decimal::ZERO => {
            return Err(PuntError::Validation(
                "Stop price must be positive".to_string(),
            ));
        }
        None if intent.order_type.requires_stop_price() => {
            return Err(PuntError::Validation(
                "STOP_LIMIT orders require a stop price".to_string(),
            ));
        }
        _ => {}
    }

    Ok(())
}
