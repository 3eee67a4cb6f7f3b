//! Persistence adapters for the trade repository port.

mod in_memory;
mod retry;
mod sqlite;

pub use in_memory::InMemoryTradeRepository;
pub use retry::{BackoffCalculator, RetryPolicy};
pub use sqlite::SqliteTradeRepository;
