//! In-memory trade repository.
//!
//! Default backend when no database URL is configured; also the test
//! and development backend.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{TradeRepositoryError, TradeRepositoryPort};
use crate::domain::{Ticker, Trade};

/// In-memory implementation of `TradeRepositoryPort`.
#[derive(Debug, Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trades: RwLock::new(Vec::new()),
        }
    }

    /// Number of trades in the repository.
    pub async fn len(&self) -> usize {
        self.trades.read().await.len()
    }

    /// Whether the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.trades.read().await.is_empty()
    }

    /// Clear all trades (for test setup).
    pub async fn clear(&self) {
        self.trades.write().await.clear();
    }
}

#[async_trait]
impl TradeRepositoryPort for InMemoryTradeRepository {
    async fn add(&self, trade: &Trade) -> Result<(), TradeRepositoryError> {
        self.trades.write().await.push(trade.clone());
        Ok(())
    }

    async fn get_by_ticker(&self, ticker: &Ticker) -> Result<Vec<Trade>, TradeRepositoryError> {
        let trades = self.trades.read().await;
        Ok(trades
            .iter()
            .filter(|t| &t.ticker == ticker)
            .cloned()
            .collect())
    }

    async fn get_by_tickers(
        &self,
        tickers: &[Ticker],
    ) -> Result<Vec<Trade>, TradeRepositoryError> {
        let wanted: HashSet<&Ticker> = tickers.iter().collect();
        let trades = self.trades.read().await;
        Ok(trades
            .iter()
            .filter(|t| wanted.contains(&t.ticker))
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Trade>, TradeRepositoryError> {
        Ok(self.trades.read().await.clone())
    }
}
