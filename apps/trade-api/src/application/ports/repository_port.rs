//! Trade Repository Port (Driven Port)
//!
//! Contract for durable trade storage. Writes are atomic at the single
//! trade level, and implementations retry transient failures themselves
//! before surfacing an error. Reads carry no ordering guarantee.

use async_trait::async_trait;

use crate::domain::{Ticker, Trade};

/// Repository error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TradeRepositoryError {
    /// Storage backend could not be reached (retries exhausted).
    #[error("Repository connection error: {message}")]
    Connection {
        /// Description of the failure.
        message: String,
    },

    /// A statement failed to execute.
    #[error("Repository query error: {message}")]
    Query {
        /// Description of the failure.
        message: String,
    },

    /// Stored data could not be mapped back to a domain trade.
    #[error("Repository data integrity error: {message}")]
    Integrity {
        /// Description of the failure.
        message: String,
    },
}

/// Port for persisting and retrieving trades.
#[async_trait]
pub trait TradeRepositoryPort: Send + Sync {
    /// Persist a single trade, all-or-nothing.
    async fn add(&self, trade: &Trade) -> Result<(), TradeRepositoryError>;

    /// Fetch all trades for one ticker.
    async fn get_by_ticker(&self, ticker: &Ticker) -> Result<Vec<Trade>, TradeRepositoryError>;

    /// Fetch all trades for a set of tickers in one call.
    async fn get_by_tickers(&self, tickers: &[Ticker])
    -> Result<Vec<Trade>, TradeRepositoryError>;

    /// Fetch the full trade history.
    async fn get_all(&self) -> Result<Vec<Trade>, TradeRepositoryError>;
}
