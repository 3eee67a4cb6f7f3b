//! In-process event publisher over a tokio broadcast channel.
//!
//! Carries trade-recorded events to in-process consumers on a named
//! topic. Delivery is at-most-once: a send with no live subscribers is
//! a publish failure, which the trade service swallows like any other.
//! An external message broker can replace this behind the same port.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::TradeRecorded;

/// Broadcast-channel implementation of `EventPublisherPort`.
pub struct BroadcastEventPublisher {
    topic: String,
    sender: broadcast::Sender<TradeRecorded>,
}

impl BroadcastEventPublisher {
    /// Create a publisher for a topic with a bounded channel.
    #[must_use]
    pub fn new(topic: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            topic: topic.into(),
            sender,
        }
    }

    /// Topic this publisher emits on.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Open a new subscription to the topic.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TradeRecorded> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisherPort for BroadcastEventPublisher {
    async fn publish(&self, event: TradeRecorded) -> Result<(), EventPublishError> {
        tracing::debug!(topic = %self.topic, trade_id = %event.trade_id, "publishing event");

        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|_| EventPublishError::PublishFailed {
                message: format!("no active subscribers on '{}'", self.topic),
            })
    }
}

/// Consume events from a subscription and log them.
///
/// Runs until the publisher is dropped. Lagged receivers skip ahead;
/// dropped events are only logged, never redelivered.
pub async fn log_consumed_events(
    mut receiver: broadcast::Receiver<TradeRecorded>,
    topic: String,
) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                tracing::info!(
                    topic = %topic,
                    trade_id = %event.trade_id,
                    ticker = %event.ticker,
                    price = %event.price,
                    "consumed trade event"
                );
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(topic = %topic, skipped, "event consumer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
