//! In-process cache backend with per-entry TTL.
//!
//! Suitable for single-node deployments, development and testing. A
//! distributed backend (e.g. Redis) plugs in behind the same port.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{CacheError, CachePort};

struct CacheEntry {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// TTL map over a `tokio` read/write lock.
///
/// Expiry is checked lazily on read; expired entries are dropped the
/// first time they are looked up after their deadline.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently held, including not-yet-collected
    /// expired ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CachePort for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.bytes.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Entry exists but expired; collect it under the write lock.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at <= Instant::now() {
                entries.remove(key);
            } else {
                // A concurrent set refreshed the entry in between.
                return Ok(Some(entry.bytes.clone()));
            }
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry {
            bytes: value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
