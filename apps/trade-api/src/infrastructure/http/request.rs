//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BrokerId, NewTrade, Ticker};

/// Request to record a trade.
///
/// Id and timestamp are deliberately absent: the service assigns both
/// at acceptance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTradeRequest {
    /// Instrument symbol.
    pub ticker: String,
    /// Executed price.
    pub price: Decimal,
    /// Executed quantity.
    pub quantity: Decimal,
    /// Broker that executed the trade.
    pub broker_id: String,
}

impl RecordTradeRequest {
    /// Convert into the domain command.
    #[must_use]
    pub fn into_command(self) -> NewTrade {
        NewTrade {
            ticker: Ticker::new(self.ticker),
            price: self.price,
            quantity: self.quantity,
            broker_id: BrokerId::new(self.broker_id),
        }
    }
}
