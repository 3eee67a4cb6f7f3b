//! Application services: the trade recorder and its caching decorator.

mod cached_trade_service;
mod trade_service;

pub use cached_trade_service::{CachedTradeService, DEFAULT_TTL_SECS};
pub use trade_service::{TradeService, TradeServiceError, TradeStore};
