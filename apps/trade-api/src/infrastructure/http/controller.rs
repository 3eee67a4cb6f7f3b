//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the trade store. The store is
//! the caching decorator in production wiring, but any implementor of
//! the contract works here.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::application::services::TradeStore;
use crate::domain::Ticker;

use super::request::RecordTradeRequest;
use super::response::{ApiError, ApiResponse, HealthResponse, TickerValueResponse};

/// Application state shared across handlers.
pub struct AppState<S>
where
    S: TradeStore,
{
    /// The trade store handling all requests.
    pub service: Arc<S>,
    /// Application version.
    pub version: String,
}

impl<S> Clone for AppState<S>
where
    S: TradeStore,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: TradeStore + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/trades", post(record_trade).get(all_average_prices))
        .route("/api/v1/trades/{ticker}", get(average_price))
        .route("/api/v1/trades/range", post(average_prices))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: TradeStore,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Record a trade.
async fn record_trade<S>(
    State(state): State<AppState<S>>,
    Json(request): Json<RecordTradeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: TradeStore,
{
    state.service.record_trade(request.into_command()).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::<()>::message("Trade recorded")),
    ))
}

/// Current value for one ticker.
async fn average_price<S>(
    State(state): State<AppState<S>>,
    Path(ticker): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: TradeStore,
{
    let ticker = Ticker::new(ticker);
    let value = state.service.average_price(&ticker).await?;

    Ok(Json(ApiResponse::ok(TickerValueResponse {
        ticker: ticker.into_inner(),
        value,
    })))
}

/// Current values for a requested set of tickers; unknown tickers map
/// to null.
async fn average_prices<S>(
    State(state): State<AppState<S>>,
    Json(tickers): Json<Vec<String>>,
) -> Result<impl IntoResponse, ApiError>
where
    S: TradeStore,
{
    let tickers: Vec<Ticker> = tickers.into_iter().map(Ticker::new).collect();
    let values = state.service.average_prices(&tickers).await?;

    let payload: HashMap<String, Option<Decimal>> = values
        .into_iter()
        .map(|(ticker, value)| (ticker.into_inner(), value))
        .collect();
    Ok(Json(ApiResponse::ok(payload)))
}

/// Current values for every ticker with trade history.
async fn all_average_prices<S>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
    S: TradeStore,
{
    let values = state.service.all_average_prices().await?;

    let payload: HashMap<String, Decimal> = values
        .into_iter()
        .map(|(ticker, value)| (ticker.into_inner(), value))
        .collect();
    Ok(Json(ApiResponse::ok(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NoOpEventPublisher;
    use crate::application::services::{CachedTradeService, TradeService};
    use crate::infrastructure::cache::InMemoryCache;
    use crate::infrastructure::persistence::InMemoryTradeRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    /// Decimals serialize as JSON strings; parse them back for comparison.
    fn as_decimal(value: &serde_json::Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    fn router() -> Router {
        let repository = Arc::new(InMemoryTradeRepository::new());
        let service = TradeService::new(repository, Arc::new(NoOpEventPublisher));
        let cached = CachedTradeService::with_default_ttl(service, Arc::new(InMemoryCache::new()));

        create_router(AppState {
            service: Arc::new(cached),
            version: "test".to_string(),
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let response = router().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn record_trade_is_accepted() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":120.50,"quantity":10,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Trade recorded");
    }

    #[tokio::test]
    async fn invalid_trade_is_bad_request() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":-5,"quantity":0,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("price"));
        assert!(message.contains("quantity"));
    }

    #[tokio::test]
    async fn unknown_ticker_is_not_found() {
        let response = router()
            .oneshot(get_request("/api/v1/trades/XXX"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn recorded_trade_is_queryable() {
        let router = router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":120.50,"quantity":10,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = router
            .oneshot(get_request("/api/v1/trades/VOD"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["ticker"], "VOD");
        assert_eq!(as_decimal(&json["data"]["value"]), dec!(120.50));
    }

    #[tokio::test]
    async fn range_query_mixes_known_and_unknown() {
        let router = router();

        router
            .clone()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":100,"quantity":10,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();
        router
            .clone()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":200,"quantity":10,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(post_json("/api/v1/trades/range", r#"["VOD","XXX"]"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(as_decimal(&json["data"]["VOD"]), dec!(150));
        assert_eq!(json["data"]["XXX"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn get_all_returns_every_ticker() {
        let router = router();

        router
            .clone()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"VOD","price":100,"quantity":10,"brokerId":"B1"}"#,
            ))
            .await
            .unwrap();
        router
            .clone()
            .oneshot(post_json(
                "/api/v1/trades",
                r#"{"ticker":"BARC","price":50,"quantity":10,"brokerId":"B2"}"#,
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(get_request("/api/v1/trades"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"].as_object().unwrap().len(), 2);
    }
}
