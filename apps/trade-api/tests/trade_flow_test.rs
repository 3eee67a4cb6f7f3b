//! Trade Flow Integration Tests
//!
//! End-to-end tests wiring the full service stack the way the binary
//! does: in-memory repository, broadcast publisher, caching decorator
//! over the core service. Exercises the record and query flows through
//! the `TradeStore` contract.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::time::timeout;

use trade_api::application::services::{
    CachedTradeService, TradeService, TradeServiceError, TradeStore,
};
use trade_api::domain::{BrokerId, NewTrade, Ticker};
use trade_api::infrastructure::cache::InMemoryCache;
use trade_api::infrastructure::eventing::BroadcastEventPublisher;
use trade_api::infrastructure::persistence::InMemoryTradeRepository;

type Stack = CachedTradeService<
    TradeService<InMemoryTradeRepository, BroadcastEventPublisher>,
    InMemoryCache,
>;

/// Wire the full production stack on in-memory adapters.
fn make_stack() -> (Stack, Arc<BroadcastEventPublisher>) {
    let repository = Arc::new(InMemoryTradeRepository::new());
    let publisher = Arc::new(BroadcastEventPublisher::new("trades.recorded", 16));
    let service = TradeService::new(repository, Arc::clone(&publisher));
    let cached = CachedTradeService::new(
        service,
        Arc::new(InMemoryCache::new()),
        Duration::from_secs(120),
    );
    (cached, publisher)
}

fn trade(ticker: &str, price: rust_decimal::Decimal) -> NewTrade {
    NewTrade {
        ticker: Ticker::new(ticker),
        price,
        quantity: dec!(10),
        broker_id: BrokerId::new("BRK-1"),
    }
}

#[tokio::test]
async fn single_trade_sets_the_average() {
    let (stack, publisher) = make_stack();
    let mut events = publisher.subscribe();

    stack.record_trade(trade("VOD", dec!(120.50))).await.unwrap();

    let value = stack.average_price(&Ticker::new("VOD")).await.unwrap();
    assert_eq!(value, dec!(120.50));

    let event = timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event should be emitted")
        .unwrap();
    assert_eq!(event.ticker, Ticker::new("VOD"));
    assert_eq!(event.price, dec!(120.50));
}

#[tokio::test]
async fn average_reflects_all_recorded_trades() {
    let (stack, _publisher) = make_stack();

    stack.record_trade(trade("VOD", dec!(100))).await.unwrap();
    stack.record_trade(trade("VOD", dec!(200))).await.unwrap();

    let value = stack.average_price(&Ticker::new("VOD")).await.unwrap();
    assert_eq!(value, dec!(150));
}

#[tokio::test]
async fn write_invalidates_a_previously_cached_value() {
    let (stack, _publisher) = make_stack();

    stack.record_trade(trade("VOD", dec!(100))).await.unwrap();
    // Prime the cache.
    assert_eq!(
        stack.average_price(&Ticker::new("VOD")).await.unwrap(),
        dec!(100)
    );

    stack.record_trade(trade("VOD", dec!(200))).await.unwrap();
    assert_eq!(
        stack.average_price(&Ticker::new("VOD")).await.unwrap(),
        dec!(150)
    );
}

#[tokio::test]
async fn unknown_ticker_is_not_found() {
    let (stack, _publisher) = make_stack();

    let result = stack.average_price(&Ticker::new("XXX")).await;
    assert!(matches!(
        result,
        Err(TradeServiceError::TickerNotFound { .. })
    ));
}

#[tokio::test]
async fn batch_query_mixes_known_and_unknown_tickers() {
    let (stack, _publisher) = make_stack();

    stack.record_trade(trade("VOD", dec!(100))).await.unwrap();
    stack.record_trade(trade("VOD", dec!(200))).await.unwrap();

    let values = stack
        .average_prices(&[Ticker::new("VOD"), Ticker::new("XXX")])
        .await
        .unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(values[&Ticker::new("VOD")], Some(dec!(150)));
    assert_eq!(values[&Ticker::new("XXX")], None);
}

#[tokio::test]
async fn all_averages_cover_every_ticker() {
    let (stack, _publisher) = make_stack();

    stack.record_trade(trade("VOD", dec!(100))).await.unwrap();
    stack.record_trade(trade("BARC", dec!(50))).await.unwrap();
    stack.record_trade(trade("BARC", dec!(70))).await.unwrap();

    let values = stack.all_average_prices().await.unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[&Ticker::new("VOD")], dec!(100));
    assert_eq!(values[&Ticker::new("BARC")], dec!(60));
}

#[tokio::test]
async fn invalid_trade_changes_nothing() {
    let (stack, publisher) = make_stack();
    let mut events = publisher.subscribe();

    stack.record_trade(trade("VOD", dec!(100))).await.unwrap();
    // Drain the event from the valid trade.
    timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("valid trade should emit")
        .unwrap();

    let result = stack.record_trade(trade("VOD", dec!(-5))).await;
    assert!(matches!(result, Err(TradeServiceError::Validation(_))));

    // Prior average is unaffected and no event was published.
    assert_eq!(
        stack.average_price(&Ticker::new("VOD")).await.unwrap(),
        dec!(100)
    );
    assert!(timeout(Duration::from_millis(100), events.recv())
        .await
        .is_err());
}

#[tokio::test]
async fn ticker_lookup_is_case_insensitive() {
    let (stack, _publisher) = make_stack();

    stack.record_trade(trade("vod", dec!(100))).await.unwrap();

    let value = stack.average_price(&Ticker::new("VOD")).await.unwrap();
    assert_eq!(value, dec!(100));
}
