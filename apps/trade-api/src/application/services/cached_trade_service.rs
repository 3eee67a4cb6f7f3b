//! Cache-aside decorator for the trade service.
//!
//! A second implementor of [`TradeStore`] that composes the inner
//! service with a cache behind [`CachePort`]. Reads check the cache
//! first and populate it on miss; writes delegate and invalidate only
//! after the inner write committed. Staleness is bounded by the entry
//! TTL, not eliminated; the decorator never touches the underlying
//! trade history.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::CachePort;
use crate::domain::{NewTrade, Ticker};

use super::trade_service::{TradeServiceError, TradeStore};

/// Sentinel key for the full ticker->value snapshot.
const ALL_VALUES_KEY: &str = "trade:value:all";

/// Default time-to-live for cache entries, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 120;

fn ticker_key(ticker: &Ticker) -> String {
    format!("trade:value:{ticker}")
}

/// Cache-aside decorator around an inner [`TradeStore`].
pub struct CachedTradeService<S, C>
where
    S: TradeStore,
    C: CachePort,
{
    inner: S,
    cache: Arc<C>,
    ttl: Duration,
}

impl<S, C> CachedTradeService<S, C>
where
    S: TradeStore,
    C: CachePort,
{
    /// Wrap an inner service with the given cache and entry TTL.
    pub fn new(inner: S, cache: Arc<C>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Wrap with the default 120 second TTL.
    pub fn with_default_ttl(inner: S, cache: Arc<C>) -> Self {
        Self::new(inner, cache, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Fetch and deserialize a cached entry.
    ///
    /// Backend failures and undecodable payloads are logged and treated
    /// as a miss; the read path then falls through to the inner service.
    async fn cache_lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(%error, key, "cache read failed; falling through");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                tracing::debug!(key, "cache hit");
                Some(value)
            }
            Err(error) => {
                tracing::warn!(%error, key, "undecodable cache entry; treating as miss");
                None
            }
        }
    }

    /// Serialize and store an entry with this decorator's TTL.
    ///
    /// Failures are logged and discarded; the result being cached has
    /// already been computed from the source of truth.
    async fn cache_store<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, key, "cache entry serialization failed");
                return;
            }
        };

        if let Err(error) = self.cache.set(key, bytes, self.ttl).await {
            tracing::warn!(%error, key, "cache write failed");
        }
    }

    /// Drop an entry; failures bound staleness to the TTL at worst.
    async fn cache_evict(&self, key: &str) {
        if let Err(error) = self.cache.remove(key).await {
            tracing::warn!(%error, key, "cache invalidation failed; entry expires by TTL");
        }
    }
}

#[async_trait]
impl<S, C> TradeStore for CachedTradeService<S, C>
where
    S: TradeStore,
    C: CachePort,
{
    async fn record_trade(&self, candidate: NewTrade) -> Result<(), TradeServiceError> {
        let ticker = candidate.ticker.clone();
        self.inner.record_trade(candidate).await?;

        // Invalidation strictly after the inner write committed. On
        // failure above, no cache entry is touched.
        self.cache_evict(&ticker_key(&ticker)).await;
        self.cache_evict(ALL_VALUES_KEY).await;
        Ok(())
    }

    async fn average_price(&self, ticker: &Ticker) -> Result<Decimal, TradeServiceError> {
        let key = ticker_key(ticker);

        // A batch read may have cached an explicit absent value for
        // this ticker; honor it with the single-read contract instead
        // of refetching.
        if let Some(cached) = self.cache_lookup::<Option<Decimal>>(&key).await {
            return cached.ok_or_else(|| TradeServiceError::TickerNotFound {
                ticker: ticker.clone(),
            });
        }

        // NotFound from the inner call propagates without caching.
        let value = self.inner.average_price(ticker).await?;
        self.cache_store(&key, &Some(value)).await;
        Ok(value)
    }

    async fn average_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<HashMap<Ticker, Option<Decimal>>, TradeServiceError> {
        let mut result = HashMap::with_capacity(tickers.len());
        let mut misses = Vec::new();

        for ticker in tickers {
            match self
                .cache_lookup::<Option<Decimal>>(&ticker_key(ticker))
                .await
            {
                Some(cached) => {
                    result.insert(ticker.clone(), cached);
                }
                None => misses.push(ticker.clone()),
            }
        }

        if !misses.is_empty() {
            let fetched = self.inner.average_prices(&misses).await?;
            for (ticker, value) in fetched {
                // Each fresh entry gets its own TTL window; absent
                // values are cached faithfully.
                self.cache_store(&ticker_key(&ticker), &value).await;
                result.insert(ticker, value);
            }
        }

        Ok(result)
    }

    async fn all_average_prices(&self) -> Result<HashMap<Ticker, Decimal>, TradeServiceError> {
        if let Some(cached) = self
            .cache_lookup::<HashMap<Ticker, Decimal>>(ALL_VALUES_KEY)
            .await
        {
            return Ok(cached);
        }

        let values = self.inner.all_average_prices().await?;
        self.cache_store(ALL_VALUES_KEY, &values).await;
        Ok(values)
    }
}
