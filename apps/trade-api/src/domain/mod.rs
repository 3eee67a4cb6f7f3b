//! Domain layer: core business types with no I/O.

pub mod events;
pub mod identifiers;
pub mod pricing;
pub mod ticker;
pub mod trade;
pub mod validation;

pub use events::TradeRecorded;
pub use identifiers::{BrokerId, TradeId};
pub use ticker::Ticker;
pub use trade::{NewTrade, Trade};
pub use validation::{TradeValidator, ValidationError};
