// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Trade API - Rust Core Library
//!
//! Trade ingestion and valuation service for exchange-listed
//! instruments. Accepts trade reports, answers current-value queries
//! (the average of all recorded trade prices per ticker), and emits a
//! best-effort domain event for every accepted trade.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `trade`: Trade aggregate and field constraints
//!   - `validation`: Exhaustive trade validation
//!   - `pricing`: Average-price computation over trade history
//!   - `events`: `TradeRecorded` domain event
//!
//! - **Application**: Services and ports
//!   - `ports`: Interfaces for external systems (`TradeRepositoryPort`,
//!     `EventPublisherPort`, `CachePort`)
//!   - `services`: `TradeService` (core flow) and `CachedTradeService`
//!     (cache-aside decorator over the same `TradeStore` contract)
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: Trade repository (in-memory, SQLite)
//!   - `cache`: In-memory TTL cache
//!   - `eventing`: Broadcast-channel event publisher
//!   - `http`: Axum REST controller

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

pub use application::services::{CachedTradeService, TradeService, TradeServiceError, TradeStore};
pub use domain::{NewTrade, Ticker, Trade, TradeRecorded};
