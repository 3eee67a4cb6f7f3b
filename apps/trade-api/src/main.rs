//! Trade API Binary
//!
//! Starts the trade ingestion and valuation service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin trade-api
//! ```
//!
//! # Environment Variables
//!
//! - `TRADE_API_CONFIG`: Path to the YAML config file (default: config.yaml;
//!   missing default file falls back to built-in defaults)
//! - `RUST_LOG`: Log filter override

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use trade_api::application::ports::{EventPublisherPort, NoOpEventPublisher, TradeRepositoryPort};
use trade_api::application::services::{CachedTradeService, TradeService};
use trade_api::config::{Config, ConfigError, load_config};
use trade_api::infrastructure::cache::InMemoryCache;
use trade_api::infrastructure::eventing::{BroadcastEventPublisher, log_consumed_events};
use trade_api::infrastructure::http::{AppState, create_router};
use trade_api::infrastructure::persistence::{InMemoryTradeRepository, SqliteTradeRepository};
use trade_api::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("TRADE_API_CONFIG").ok();
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        // Running without the default config file is fine
        Err(ConfigError::ReadError { .. }) if config_path.is_none() => Config::default(),
        Err(e) => return Err(e.into()),
    };

    init_tracing(&config.observability.logging.level);

    tracing::info!(
        http_port = config.server.http_port,
        cache_ttl_secs = config.cache.trade_value_ttl_secs,
        eventing_enabled = config.eventing.enabled,
        persistent = config.persistence.database_url.is_some(),
        "Starting Trade API"
    );

    match config.persistence.database_url.clone() {
        Some(url) => {
            let repository = SqliteTradeRepository::connect(&url).await?;
            run(config, Arc::new(repository)).await
        }
        None => {
            tracing::warn!("no database_url configured, trades are held in memory only");
            run(config, Arc::new(InMemoryTradeRepository::new())).await
        }
    }
}

async fn run<R>(config: Config, repository: Arc<R>) -> anyhow::Result<()>
where
    R: TradeRepositoryPort + 'static,
{
    if config.eventing.enabled {
        let publisher = BroadcastEventPublisher::new(
            config.eventing.topic.clone(),
            config.eventing.channel_capacity,
        );
        // Keep one consumer alive so publishes never fail for lack of
        // subscribers.
        tokio::spawn(log_consumed_events(
            publisher.subscribe(),
            config.eventing.topic.clone(),
        ));
        serve(config, repository, Arc::new(publisher)).await
    } else {
        serve(config, repository, Arc::new(NoOpEventPublisher)).await
    }
}

async fn serve<R, E>(config: Config, repository: Arc<R>, publisher: Arc<E>) -> anyhow::Result<()>
where
    R: TradeRepositoryPort + 'static,
    E: EventPublisherPort + 'static,
{
    let service = TradeService::new(repository, publisher);
    let cached = CachedTradeService::new(service, Arc::new(InMemoryCache::new()), config.cache.ttl());

    let state = AppState {
        service: Arc::new(cached),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let router = create_router(state);

    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Trade API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
