//! Persistence configuration.

use serde::{Deserialize, Serialize};

/// Persistence configuration.
///
/// When `database_url` is unset the service runs on the in-memory
/// repository and loses all trades on restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// SQLite connection string, e.g. `sqlite://trades.db?mode=rwc`.
    #[serde(default)]
    pub database_url: Option<String>,
}
