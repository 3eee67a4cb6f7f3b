//! Eventing configuration.

use serde::{Deserialize, Serialize};

/// Eventing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventingConfig {
    /// Whether the broadcast publisher is wired in. Disabled means the
    /// no-op publisher.
    #[serde(default)]
    pub enabled: bool,
    /// Topic name attached to published events.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Broadcast channel capacity before slow consumers lag.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for EventingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            topic: default_topic(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

pub(crate) fn default_topic() -> String {
    "trades.recorded".to_string()
}

pub(crate) const fn default_channel_capacity() -> usize {
    256
}
