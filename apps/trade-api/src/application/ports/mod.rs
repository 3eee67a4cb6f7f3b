//! Ports: contracts the application layer expects its collaborators to
//! implement.

mod cache_port;
mod event_publisher_port;
mod repository_port;

pub use cache_port::{CacheError, CachePort};
pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use repository_port::{TradeRepositoryError, TradeRepositoryPort};
