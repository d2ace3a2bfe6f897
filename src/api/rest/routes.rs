//! # Route Configuration
//!
//! Assembles the axum router: quote endpoints plus tracing and CORS
//! layers.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the service router over shared state.
///
/// # Endpoints
///
/// - `POST /api/v1/quotes` - single-pair quote
/// - `POST /api/v1/quotes/bulk` - CSV batch quote
/// - `GET /api/v1/quotes` - list cached quotes
/// - `GET /api/v1/health` - liveness probe
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/quotes",
            post(handlers::create_quote).get(handlers::list_quotes),
        )
        .route("/api/v1/quotes/bulk", post(handlers::bulk_quotes))
        .route("/api/v1/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
