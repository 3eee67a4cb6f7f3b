//! Domain events emitted by the trade service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::identifiers::{BrokerId, TradeId};
use super::ticker::Ticker;
use super::trade::Trade;

/// Immutable snapshot of an accepted trade, published after persistence.
///
/// Serialized as camelCase JSON on the wire. The event has no lifecycle
/// beyond the publish attempt; delivery is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecorded {
    /// Id of the accepted trade.
    pub trade_id: TradeId,
    /// Instrument symbol.
    pub ticker: Ticker,
    /// Executed price.
    pub price: Decimal,
    /// Executed quantity.
    pub quantity: Decimal,
    /// Broker that executed the trade.
    pub broker_id: BrokerId,
    /// Acceptance timestamp.
    pub timestamp: DateTime<Utc>,
}

impl TradeRecorded {
    /// Derive the event from an accepted trade.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            trade_id: trade.id.clone(),
            ticker: trade.ticker.clone(),
            price: trade.price,
            quantity: trade.quantity,
            broker_id: trade.broker_id.clone(),
            timestamp: trade.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn derives_all_fields_from_trade() {
        let trade = Trade {
            id: TradeId::new("t-1"),
            ticker: Ticker::new("VOD"),
            price: dec!(120.50),
            quantity: dec!(10),
            broker_id: BrokerId::new("B1"),
            timestamp: Utc::now(),
        };

        let event = TradeRecorded::from_trade(&trade);
        assert_eq!(event.trade_id, trade.id);
        assert_eq!(event.ticker, trade.ticker);
        assert_eq!(event.price, trade.price);
        assert_eq!(event.quantity, trade.quantity);
        assert_eq!(event.broker_id, trade.broker_id);
        assert_eq!(event.timestamp, trade.timestamp);
    }

    #[test]
    fn payload_uses_camel_case_keys() {
        let trade = Trade {
            id: TradeId::new("t-1"),
            ticker: Ticker::new("VOD"),
            price: dec!(120.50),
            quantity: dec!(10),
            broker_id: BrokerId::new("B1"),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(TradeRecorded::from_trade(&trade)).unwrap();
        assert!(json.get("tradeId").is_some());
        assert!(json.get("brokerId").is_some());
        assert!(json.get("ticker").is_some());
    }
}
