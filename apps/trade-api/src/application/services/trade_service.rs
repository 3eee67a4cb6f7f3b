//! Core trade recording and valuation service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::application::ports::{EventPublisherPort, TradeRepositoryError, TradeRepositoryPort};
use crate::domain::{
    NewTrade, Ticker, TradeId, TradeRecorded, TradeValidator, ValidationError, pricing,
    trade::Trade,
};

/// Errors surfaced by the trade service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TradeServiceError {
    /// One or more field constraints were violated; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A single-ticker query found no trade history.
    #[error("ticker '{ticker}' not found")]
    TickerNotFound {
        /// The requested ticker.
        ticker: Ticker,
    },

    /// The repository failed after exhausting its own retry policy.
    #[error(transparent)]
    Repository(#[from] TradeRepositoryError),
}

/// Capability contract for recording trades and querying average prices.
///
/// Implemented by [`TradeService`] and again by the caching decorator,
/// which wraps an inner implementation behind the same contract.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Validate, accept and durably record a candidate trade.
    async fn record_trade(&self, candidate: NewTrade) -> Result<(), TradeServiceError>;

    /// Current value of a ticker: mean of all recorded trade prices.
    ///
    /// # Errors
    ///
    /// `TickerNotFound` when no trades exist for the ticker.
    async fn average_price(&self, ticker: &Ticker) -> Result<Decimal, TradeServiceError>;

    /// Current values for a set of tickers in one batched lookup.
    ///
    /// Requested tickers with no trade history are present in the
    /// result with a `None` value; this is never an error.
    async fn average_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<HashMap<Ticker, Option<Decimal>>, TradeServiceError>;

    /// Current values for every ticker in the full trade history.
    async fn all_average_prices(&self) -> Result<HashMap<Ticker, Decimal>, TradeServiceError>;
}

/// The trade recorder: orchestrates validation, id/timestamp
/// assignment, persistence and best-effort event emission.
pub struct TradeService<R, E>
where
    R: TradeRepositoryPort,
    E: EventPublisherPort,
{
    repository: Arc<R>,
    publisher: Arc<E>,
    validator: TradeValidator,
}

impl<R, E> TradeService<R, E>
where
    R: TradeRepositoryPort,
    E: EventPublisherPort + 'static,
{
    /// Create a new trade service.
    pub fn new(repository: Arc<R>, publisher: Arc<E>) -> Self {
        Self {
            repository,
            publisher,
            validator: TradeValidator::new(),
        }
    }
}

/// Hand the event to the publisher on a detached task.
///
/// The persistence commit has already happened; no publisher outcome
/// may change the result of the write path. Failures are logged and
/// discarded here, nowhere else.
fn emit_event<E>(publisher: Arc<E>, event: TradeRecorded)
where
    E: EventPublisherPort + 'static,
{
    tokio::spawn(async move {
        if let Err(error) = publisher.publish(event).await {
            tracing::warn!(%error, "trade event publish failed; write path unaffected");
        }
    });
}

#[async_trait]
impl<R, E> TradeStore for TradeService<R, E>
where
    R: TradeRepositoryPort + 'static,
    E: EventPublisherPort + 'static,
{
    async fn record_trade(&self, candidate: NewTrade) -> Result<(), TradeServiceError> {
        self.validator.validate(&candidate)?;

        let trade = Trade::accept(candidate, TradeId::generate(), Utc::now());
        let repository = Arc::clone(&self.repository);
        let publisher = Arc::clone(&self.publisher);

        // The persist and the emission hand-off share one detached
        // task: a caller dropping this future while the repository is
        // still acknowledging a committed write can no longer sever
        // the emission from the commit.
        let write = tokio::spawn(async move {
            repository.add(&trade).await?;

            tracing::info!(
                trade_id = %trade.id,
                ticker = %trade.ticker,
                price = %trade.price,
                "trade recorded"
            );

            emit_event(publisher, TradeRecorded::from_trade(&trade));
            Ok::<(), TradeServiceError>(())
        });

        match write.await {
            Ok(result) => result,
            Err(error) => Err(TradeServiceError::Repository(TradeRepositoryError::Query {
                message: format!("write task failed: {error}"),
            })),
        }
    }

    async fn average_price(&self, ticker: &Ticker) -> Result<Decimal, TradeServiceError> {
        let trades = self.repository.get_by_ticker(ticker).await?;

        pricing::average_price(&trades).ok_or_else(|| TradeServiceError::TickerNotFound {
            ticker: ticker.clone(),
        })
    }

    async fn average_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<HashMap<Ticker, Option<Decimal>>, TradeServiceError> {
        let trades = self.repository.get_by_tickers(tickers).await?;
        let averages = pricing::average_price_by_ticker(&trades);

        // Every requested ticker gets an entry, absent ones map to None.
        let mut result = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            result.insert(ticker.clone(), averages.get(ticker).copied());
        }
        Ok(result)
    }

    async fn all_average_prices(&self) -> Result<HashMap<Ticker, Decimal>, TradeServiceError> {
        let trades = self.repository.get_all().await?;
        Ok(pricing::average_price_by_ticker(&trades))
    }
}
