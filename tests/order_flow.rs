//! End-to-end order flow through validation, dispatch, and the simulated
//! exchange. No network access and no environment mutation.

use punt::config::ExchangeConfig;
use punt::dispatch::{format_report, OrderDispatcher};
use punt::domain::{OrderType, Side};
use punt::exchange::ExchangeClient;
use punt::{parser, validation, PuntError};

fn sim_client() -> ExchangeClient {
    ExchangeClient::new(&ExchangeConfig::default(), None, true).expect("simulation client")
}

#[tokio::test]
async fn market_order_round_trip() {
    let client = sim_client();

    let intent = validation::validate_order("btcusdt", "buy", "market", "0.002", None, None)
        .expect("valid market order");
    assert_eq!(intent.symbol, "BTCUSDT");
    assert_eq!(intent.side, Side::Buy);
    assert_eq!(intent.order_type, OrderType::Market);

    let response = OrderDispatcher::new(&client)
        .place(&intent)
        .await
        .expect("order placed");

    assert_eq!(response["status"], "FILLED");
    assert_eq!(response["executedQty"], "0.002");

    let report = format_report(&response);
    assert!(report.contains("Status: FILLED"));
    assert!(report.contains("ExecutedQty: 0.002"));
}

#[tokio::test]
async fn limit_order_rests_as_new() {
    let client = sim_client();

    let intent = validation::validate_order("ETHUSDT", "SELL", "LIMIT", "0.5", Some("2500"), None)
        .expect("valid limit order");

    let response = OrderDispatcher::new(&client)
        .place(&intent)
        .await
        .expect("order placed");

    assert_eq!(response["status"], "NEW");
    assert_eq!(response["type"], "LIMIT");
    assert_eq!(response["avgPrice"], "2500");
}

#[tokio::test]
async fn chat_command_places_stop_limit_order() {
    let client = sim_client();

    let intent =
        parser::parse("stop limit buy 0.1 sol price 150 trigger 148").expect("command parses");
    assert_eq!(intent.symbol, "SOLUSDT");
    assert_eq!(intent.order_type, OrderType::StopLimit);
    validation::validate_intent(&intent).expect("intent valid");

    let response = OrderDispatcher::new(&client)
        .place(&intent)
        .await
        .expect("order placed");

    // Stop-limit goes out on the wire as a STOP order with both prices
    assert_eq!(response["type"], "STOP");
    assert_eq!(response["status"], "NEW");
}

#[tokio::test]
async fn rejected_order_never_reaches_dispatch() {
    let err =
        validation::validate_order("BTCUSDT", "BUY", "MARKET", "-1", None, None).unwrap_err();

    match err {
        PuntError::Validation(message) => assert_eq!(message, "Quantity must be positive"),
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn limit_order_without_price_is_rejected() {
    let err =
        validation::validate_order("BTCUSDT", "BUY", "LIMIT", "0.01", None, None).unwrap_err();

    match err {
        PuntError::Validation(message) => assert_eq!(message, "LIMIT orders require a price"),
        other => panic!("expected validation error, got {other}"),
    }
}
