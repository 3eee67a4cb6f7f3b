//! Average-price calculation.
//!
//! Pure functions over `rust_decimal::Decimal`, so repeated computation
//! over an unchanged trade set is reproducible bit-for-bit. The average
//! is an unweighted arithmetic mean of recorded prices; quantity is
//! deliberately not a factor.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::ticker::Ticker;
use super::trade::Trade;

/// Arithmetic mean of `price` over a set of trades.
///
/// Returns `None` for an empty set; the average of zero trades is
/// undefined, not zero.
#[must_use]
pub fn average_price(trades: &[Trade]) -> Option<Decimal> {
    if trades.is_empty() {
        return None;
    }

    let sum: Decimal = trades.iter().map(|t| t.price).sum();
    Some(sum / Decimal::from(trades.len() as u64))
}

/// Group trades by ticker and compute the mean price per group.
///
/// Tickers with no trades are simply absent from the result.
#[must_use]
pub fn average_price_by_ticker(trades: &[Trade]) -> HashMap<Ticker, Decimal> {
    let mut grouped: HashMap<Ticker, Vec<Decimal>> = HashMap::new();
    for trade in trades {
        grouped
            .entry(trade.ticker.clone())
            .or_default()
            .push(trade.price);
    }

    grouped
        .into_iter()
        .map(|(ticker, prices)| {
            let sum: Decimal = prices.iter().sum();
            let mean = sum / Decimal::from(prices.len() as u64);
            (ticker, mean)
        })
        .collect()
}
