//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing domain events to external systems.
//! Semantics are at-most-once and best-effort: the trade service
//! swallows every publish failure, so an implementation never gets to
//! break the write path.

use async_trait::async_trait;

use crate::domain::TradeRecorded;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Connection error.
    #[error("Event publish connection error: {message}")]
    ConnectionError {
        /// Description of the failure.
        message: String,
    },

    /// Serialization error.
    #[error("Event serialization error: {message}")]
    SerializationError {
        /// Description of the failure.
        message: String,
    },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Port for publishing trade-recorded events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish a single trade-recorded event.
    async fn publish(&self, event: TradeRecorded) -> Result<(), EventPublishError>;
}

/// No-op event publisher, selected when no event sink is configured.
///
/// Publish does nothing and always succeeds; the trade service behaves
/// identically with this or any real publisher.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish(&self, _event: TradeRecorded) -> Result<(), EventPublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrokerId, Ticker, TradeId};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_event() -> TradeRecorded {
        TradeRecorded {
            trade_id: TradeId::generate(),
            ticker: Ticker::new("VOD"),
            price: dec!(120.50),
            quantity: dec!(10),
            broker_id: BrokerId::new("B1"),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn no_op_publisher_succeeds() {
        let publisher = NoOpEventPublisher;

        let result = publisher.publish(sample_event()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn no_op_publisher_accepts_repeated_events() {
        let publisher = NoOpEventPublisher;

        for _ in 0..3 {
            assert!(publisher.publish(sample_event()).await.is_ok());
        }
    }
}
