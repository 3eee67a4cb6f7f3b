//! HTTP driver adapter built on axum.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::RecordTradeRequest;
pub use response::{ApiError, ApiResponse, HealthResponse, TickerValueResponse};
