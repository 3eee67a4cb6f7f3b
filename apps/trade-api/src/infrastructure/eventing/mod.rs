//! Event publishing adapters.

mod broadcast;

pub use broadcast::{BroadcastEventPublisher, log_consumed_events};
