//! Trade record and the command used to create one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::identifiers::{BrokerId, TradeId};
use super::ticker::Ticker;

/// Field constraints for candidate trades.
pub mod constraints {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Minimum ticker length in characters.
    pub const TICKER_MIN_LEN: usize = 1;
    /// Maximum ticker length in characters.
    pub const TICKER_MAX_LEN: usize = 16;
    /// Maximum broker id length in characters.
    pub const BROKER_ID_MAX_LEN: usize = 64;
    /// Exclusive lower bound for price and quantity.
    pub const AMOUNT_MIN: Decimal = dec!(0.0001);
    /// Inclusive upper bound for price and quantity.
    pub const AMOUNT_MAX: Decimal = dec!(1000000);
}

/// A candidate trade as submitted by a client.
///
/// Carries no id and no timestamp: both are assigned by the trade
/// service at acceptance time, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    /// Instrument symbol the trade was executed for.
    pub ticker: Ticker,
    /// Executed price, in pounds.
    pub price: Decimal,
    /// Executed quantity; validated and stored but not used in valuation.
    pub quantity: Decimal,
    /// Broker that executed the trade.
    pub broker_id: BrokerId,
}

/// One executed, accepted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier, assigned at acceptance.
    pub id: TradeId,
    /// Instrument symbol.
    pub ticker: Ticker,
    /// Executed price, in pounds.
    pub price: Decimal,
    /// Executed quantity.
    pub quantity: Decimal,
    /// Broker that executed the trade.
    pub broker_id: BrokerId,
    /// UTC instant of acceptance.
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    /// Build an accepted trade from a validated command.
    ///
    /// The id and timestamp are fixed here, exactly once; the struct is
    /// never mutated afterwards.
    #[must_use]
    pub fn accept(command: NewTrade, id: TradeId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            ticker: command.ticker,
            price: command.price,
            quantity: command.quantity,
            broker_id: command.broker_id,
            timestamp,
        }
    }
}
