//! SQLite trade repository.
//!
//! Durable storage behind `TradeRepositoryPort`. Writes are single
//! INSERT statements (atomic per trade) and transient failures are
//! retried with exponential backoff before an error is surfaced.
//! Prices and quantities are stored as decimal strings so that values
//! round-trip exactly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::application::ports::{TradeRepositoryError, TradeRepositoryPort};
use crate::domain::{BrokerId, Ticker, Trade, TradeId};

use super::retry::{BackoffCalculator, RetryPolicy};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS trades (
    id          TEXT PRIMARY KEY,
    ticker      TEXT NOT NULL,
    price       TEXT NOT NULL,
    quantity    TEXT NOT NULL,
    broker_id   TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_trades_ticker ON trades (ticker);
";

/// SQLite implementation of `TradeRepositoryPort`.
pub struct SqliteTradeRepository {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl SqliteTradeRepository {
    /// Connect to the database and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the database is unreachable or the
    /// schema cannot be created.
    pub async fn connect(database_url: &str) -> Result<Self, TradeRepositoryError> {
        Self::connect_with_retry(database_url, RetryPolicy::default()).await
    }

    /// Connect with a custom write retry policy.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the database is unreachable or the
    /// schema cannot be created.
    pub async fn connect_with_retry(
        database_url: &str,
        retry: RetryPolicy,
    ) -> Result<Self, TradeRepositoryError> {
        // A single connection keeps in-memory databases coherent across
        // the pool; file databases serialize writers anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(|e| TradeRepositoryError::Connection {
                message: e.to_string(),
            })?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| TradeRepositoryError::Query {
                message: e.to_string(),
            })?;

        Ok(Self { pool, retry })
    }

    async fn try_insert(&self, trade: &Trade) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO trades (id, ticker, price, quantity, broker_id, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(trade.id.as_str())
        .bind(trade.ticker.as_str())
        .bind(trade.price.to_string())
        .bind(trade.quantity.to_string())
        .bind(trade.broker_id.as_str())
        .bind(trade.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Whether an error is worth retrying: connection drops, pool
/// exhaustion and SQLite lock contention. Constraint and syntax
/// failures are not.
fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => {
            let message = db.message().to_lowercase();
            message.contains("locked") || message.contains("busy")
        }
        _ => false,
    }
}

fn row_to_trade(row: &SqliteRow) -> Result<Trade, TradeRepositoryError> {
    let integrity = |message: String| TradeRepositoryError::Integrity { message };

    let id: String = row
        .try_get("id")
        .map_err(|e| integrity(e.to_string()))?;
    let ticker: String = row
        .try_get("ticker")
        .map_err(|e| integrity(e.to_string()))?;
    let price: String = row
        .try_get("price")
        .map_err(|e| integrity(e.to_string()))?;
    let quantity: String = row
        .try_get("quantity")
        .map_err(|e| integrity(e.to_string()))?;
    let broker_id: String = row
        .try_get("broker_id")
        .map_err(|e| integrity(e.to_string()))?;
    let timestamp: DateTime<Utc> = row
        .try_get("recorded_at")
        .map_err(|e| integrity(e.to_string()))?;

    Ok(Trade {
        id: TradeId::new(id),
        ticker: Ticker::new(ticker),
        price: price
            .parse()
            .map_err(|e| integrity(format!("bad price '{price}': {e}")))?,
        quantity: quantity
            .parse()
            .map_err(|e| integrity(format!("bad quantity '{quantity}': {e}")))?,
        broker_id: BrokerId::new(broker_id),
        timestamp,
    })
}

fn map_query_error(error: sqlx::Error) -> TradeRepositoryError {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => TradeRepositoryError::Connection {
            message: error.to_string(),
        },
        other => TradeRepositoryError::Query {
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl TradeRepositoryPort for SqliteTradeRepository {
    async fn add(&self, trade: &Trade) -> Result<(), TradeRepositoryError> {
        let mut backoff = BackoffCalculator::new(&self.retry);

        loop {
            match self.try_insert(trade).await {
                Ok(()) => return Ok(()),
                Err(error) if is_transient(&error) => match backoff.next_backoff() {
                    Some(delay) => {
                        tracing::warn!(
                            %error,
                            attempt = backoff.current_attempt(),
                            delay_ms = delay.as_millis() as u64,
                            "transient insert failure, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(map_query_error(error)),
                },
                Err(error) => return Err(map_query_error(error)),
            }
        }
    }

    async fn get_by_ticker(&self, ticker: &Ticker) -> Result<Vec<Trade>, TradeRepositoryError> {
        let rows = sqlx::query(
            "SELECT id, ticker, price, quantity, broker_id, recorded_at
             FROM trades WHERE ticker = ?",
        )
        .bind(ticker.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_query_error)?;

        rows.iter().map(row_to_trade).collect()
    }

    async fn get_by_tickers(
        &self,
        tickers: &[Ticker],
    ) -> Result<Vec<Trade>, TradeRepositoryError> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; tickers.len()].join(", ");
        let sql = format!(
            "SELECT id, ticker, price, quantity, broker_id, recorded_at
             FROM trades WHERE ticker IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql);
        for ticker in tickers {
            query = query.bind(ticker.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_error)?;

        rows.iter().map(row_to_trade).collect()
    }

    async fn get_all(&self) -> Result<Vec<Trade>, TradeRepositoryError> {
        let rows = sqlx::query(
            "SELECT id, ticker, price, quantity, broker_id, recorded_at FROM trades",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_query_error)?;

        rows.iter().map(row_to_trade).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(ticker: &str, price: rust_decimal::Decimal) -> Trade {
        Trade {
            id: TradeId::generate(),
            ticker: Ticker::new(ticker),
            price,
            quantity: dec!(10),
            broker_id: BrokerId::new("B1"),
            timestamp: Utc::now(),
        }
    }

    async fn repo() -> SqliteTradeRepository {
        SqliteTradeRepository::connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn add_and_fetch_roundtrip() {
        let repo = repo().await;
        let trade = trade("VOD", dec!(120.50));
        repo.add(&trade).await.unwrap();

        let found = repo.get_by_ticker(&Ticker::new("VOD")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, trade.id);
        assert_eq!(found[0].broker_id, trade.broker_id);
    }

    #[tokio::test]
    async fn decimal_values_roundtrip_exactly() {
        let repo = repo().await;
        repo.add(&trade("VOD", dec!(0.0002))).await.unwrap();
        repo.add(&trade("VOD", dec!(999999.9999))).await.unwrap();

        let found = repo.get_by_ticker(&Ticker::new("VOD")).await.unwrap();
        let mut prices: Vec<_> = found.iter().map(|t| t.price).collect();
        prices.sort();
        assert_eq!(prices, vec![dec!(0.0002), dec!(999999.9999)]);
    }

    #[tokio::test]
    async fn get_by_ticker_unknown_is_empty() {
        let repo = repo().await;
        let found = repo.get_by_ticker(&Ticker::new("XXX")).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn get_by_tickers_batches_in_one_query() {
        let repo = repo().await;
        repo.add(&trade("VOD", dec!(100))).await.unwrap();
        repo.add(&trade("BARC", dec!(50))).await.unwrap();
        repo.add(&trade("HSBA", dec!(75))).await.unwrap();

        let found = repo
            .get_by_tickers(&[Ticker::new("VOD"), Ticker::new("BARC")])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn get_by_tickers_empty_request_short_circuits() {
        let repo = repo().await;
        assert!(repo.get_by_tickers(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_returns_full_history() {
        let repo = repo().await;
        repo.add(&trade("VOD", dec!(100))).await.unwrap();
        repo.add(&trade("BARC", dec!(50))).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_id_is_not_retried() {
        let repo = repo().await;
        let trade = trade("VOD", dec!(100));
        repo.add(&trade).await.unwrap();

        // Primary key violation is not transient.
        let result = repo.add(&trade).await;
        assert!(matches!(result, Err(TradeRepositoryError::Query { .. })));
    }
}
