//! Natural-language command parsing.
//!
//! Turns free text like "buy 0.01 btc at market" into a structured
//! [`OrderIntent`] without an external NLP service. Three grammars are tried
//! in strict priority order, most specific first:
//!
//! 1. STOP_LIMIT: `stop limit <side> <qty> <symbol> price <p> trigger <t>`
//! 2. LIMIT:      `[limit] <side> <qty> <symbol> at <price>`
//! 3. MARKET:     `[market] <side> <qty> <symbol> [at market]`
//!
//! The ordering matters: a stop-limit phrase also contains a market-shaped
//! prefix, so the stricter grammars must win. A grammar may match anywhere
//! in the input; surrounding chatter is ignored. Returns `None` (not an
//! error) when nothing matches.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{OrderIntent, Side};

/// Bare base assets that get the default quote currency appended.
const KNOWN_BASE_ASSETS: [&str; 4] = ["BTC", "ETH", "BNB", "SOL"];

/// Parse a free-text trading command.
pub fn parse(text: &str) -> Option<OrderIntent> {
    let lowered = text.to_lowercase();

    // Map long/short onto buy/sell before matching
    let tokens: Vec<&str> = lowered
        .split_whitespace()
        .map(|token| match token {
            "long" => "buy",
            "short" => "sell",
            other => other,
        })
        .collect();

    try_stop_limit(&tokens)
        .or_else(|| try_limit(&tokens))
        .or_else(|| try_market(&tokens))
}

/// `stop limit <side> <qty> <symbol> price <price> trigger <stop>`
fn try_stop_limit(tokens: &[&str]) -> Option<OrderIntent> {
    if tokens.len() < 9 {
        return None;
    }

    for i in 0..=tokens.len() - 9 {
        if tokens[i] != "stop"
            || tokens[i + 1] != "limit"
            || tokens[i + 5] != "price"
            || tokens[i + 7] != "trigger"
        {
            continue;
        }

        let Some(side) = parse_side(tokens[i + 2]) else {
            continue;
        };
        let Some(quantity) = parse_number(tokens[i + 3]) else {
            continue;
        };
        let Some(symbol) = parse_symbol(tokens[i + 4]) else {
            continue;
        };
        let Some(price) = parse_number(tokens[i + 6]) else {
            continue;
        };
        let Some(stop_price) = parse_number(tokens[i + 8]) else {
            continue;
        };

        return Some(OrderIntent::stop_limit(
            symbol, side, quantity, price, stop_price,
        ));
    }

    None
}

/// `<side> <qty> <symbol> at <price>` (an optional leading "limit" is just
/// ignored text before the side token)
fn try_limit(tokens: &[&str]) -> Option<OrderIntent> {
    if tokens.len() < 5 {
        return None;
    }

    for i in 0..=tokens.len() - 5 {
        if tokens[i + 3] != "at" {
            continue;
        }

        let Some(side) = parse_side(tokens[i]) else {
            continue;
        };
        let Some(quantity) = parse_number(tokens[i + 1]) else {
            continue;
        };
        let Some(symbol) = parse_symbol(tokens[i + 2]) else {
            continue;
        };
        let Some(price) = parse_number(tokens[i + 4]) else {
            continue;
        };

        return Some(OrderIntent::limit(symbol, side, quantity, price));
    }

    None
}

/// `<side> <qty> <symbol>` (optional "market" prefix and "at market" suffix
/// carry no information)
fn try_market(tokens: &[&str]) -> Option<OrderIntent> {
    if tokens.len() < 3 {
        return None;
    }

    for i in 0..=tokens.len() - 3 {
        let Some(side) = parse_side(tokens[i]) else {
            continue;
        };
        let Some(quantity) = parse_number(tokens[i + 1]) else {
            continue;
        };
        let Some(symbol) = parse_symbol(tokens[i + 2]) else {
            continue;
        };

        return Some(OrderIntent::market(symbol, side, quantity));
    }

    None
}

fn parse_side(token: &str) -> Option<Side> {
    match token {
        "buy" => Some(Side::Buy),
        "sell" => Some(Side::Sell),
        _ => None,
    }
}

/// Numeric tokens are digits and dots only ("0.002", "45000").
fn parse_number(token: &str) -> Option<Decimal> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(token).ok()
}

/// Symbol tokens are alphanumeric ("btc", "ethusdt", "1000pepeusdt").
fn parse_symbol(token: &str) -> Option<String> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format_symbol(token))
}

/// Upper-case the symbol and append the default quote currency to bare
/// well-known base assets ("sol" becomes "SOLUSDT", "ethusdt" is unchanged).
fn format_symbol(token: &str) -> String {
    let symbol = token.to_uppercase();
    if !symbol.ends_with("USDT") && KNOWN_BASE_ASSETS.contains(&symbol.as_str()) {
        return format!("{}USDT", symbol);
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_command() {
        let intent = parse("buy 0.01 btc at market").unwrap();

        assert_eq!(intent.order_type, OrderType::Market);
        assert_eq!(intent.side, Side::Buy);
        assert_eq!(intent.quantity, dec!(0.01));
        assert_eq!(intent.symbol, "BTCUSDT");
        assert!(intent.price.is_none());
    }

    #[test]
    fn test_market_command_without_suffix() {
        let intent = parse("sell 2 bnb").unwrap();

        assert_eq!(intent.order_type, OrderType::Market);
        assert_eq!(intent.side, Side::Sell);
        assert_eq!(intent.symbol, "BNBUSDT");
    }

    #[test]
    fn test_limit_command() {
        let intent = parse("limit sell 0.5 eth at 2500").unwrap();

        assert_eq!(intent.order_type, OrderType::Limit);
        assert_eq!(intent.side, Side::Sell);
        assert_eq!(intent.quantity, dec!(0.5));
        assert_eq!(intent.symbol, "ETHUSDT");
        assert_eq!(intent.price, Some(dec!(2500)));
    }

    #[test]
    fn test_limit_without_keyword() {
        let intent = parse("Buy 0.1 SOL at 120").unwrap();

        assert_eq!(intent.order_type, OrderType::Limit);
        assert_eq!(intent.symbol, "SOLUSDT");
        assert_eq!(intent.price, Some(dec!(120)));
    }

    #[test]
    fn test_stop_limit_wins_over_other_grammars() {
        let intent = parse("stop limit buy 0.002 btc price 100000 trigger 99000").unwrap();

        assert_eq!(intent.order_type, OrderType::StopLimit);
        assert_eq!(intent.side, Side::Buy);
        assert_eq!(intent.quantity, dec!(0.002));
        assert_eq!(intent.symbol, "BTCUSDT");
        assert_eq!(intent.price, Some(dec!(100000)));
        assert_eq!(intent.stop_price, Some(dec!(99000)));
    }

    #[test]
    fn test_long_short_synonyms() {
        let long = parse("long 0.01 btc at market").unwrap();
        assert_eq!(long.side, Side::Buy);

        let short = parse("short 0.5 eth at 2500").unwrap();
        assert_eq!(short.side, Side::Sell);
        assert_eq!(short.order_type, OrderType::Limit);
    }

    #[test]
    fn test_match_anywhere_in_input() {
        let intent = parse("please buy 0.01 btc at market thanks").unwrap();

        assert_eq!(intent.order_type, OrderType::Market);
        assert_eq!(intent.symbol, "BTCUSDT");
    }

    #[test]
    fn test_symbol_normalization() {
        assert_eq!(parse("buy 1 sol").unwrap().symbol, "SOLUSDT");
        assert_eq!(parse("buy 1 ethusdt").unwrap().symbol, "ETHUSDT");
        // Unknown bare assets pass through unchanged
        assert_eq!(parse("buy 1 doge").unwrap().symbol, "DOGE");
    }

    #[test]
    fn test_unparseable_input() {
        assert!(parse("hello world").is_none());
        assert!(parse("").is_none());
        assert!(parse("buy btc").is_none());
        assert!(parse("buy two btc").is_none());
    }

    #[test]
    fn test_malformed_number_is_not_a_match() {
        // "1.2.3" looks numeric but does not parse as a decimal
        assert!(parse("buy 1.2.3 btc").is_none());
    }
}
