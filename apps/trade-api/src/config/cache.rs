//! Cache configuration for the trade value cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live in seconds for cached trade values.
    #[serde(default = "default_trade_value_ttl_secs")]
    pub trade_value_ttl_secs: u64,
}

impl CacheConfig {
    /// TTL as a `Duration`.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.trade_value_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            trade_value_ttl_secs: default_trade_value_ttl_secs(),
        }
    }
}

pub(crate) const fn default_trade_value_ttl_secs() -> u64 {
    120
}
