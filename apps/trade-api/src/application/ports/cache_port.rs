//! Cache Port (Driven Port)
//!
//! Byte-oriented key/value cache with per-entry time-to-live. The
//! caching decorator is the only writer and invalidator of entries;
//! the backing store (in-process map, Redis, ...) is swappable behind
//! this contract.

use std::time::Duration;

use async_trait::async_trait;

/// Cache backend error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// The cache backend failed or is unreachable.
    #[error("Cache backend error: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

/// Port for the cache store used by the caching decorator.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Look up an entry; `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store an entry with a time-to-live starting now.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry; removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
