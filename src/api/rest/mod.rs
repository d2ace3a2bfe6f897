//! # REST API
//!
//! The axum surface over the quoting pipeline.
//!
//! # Endpoints
//!
//! - `POST /api/v1/quotes` - resolve one sender/receiver pair
//! - `POST /api/v1/quotes/bulk` - resolve a CSV batch, returned as CSV
//! - `GET /api/v1/quotes` - list cached quote records
//! - `GET /api/v1/health` - health check
//!
//! # Usage
//!
//! ```ignore
//! use ship_quote::api::rest::{AppState, create_router};
//!
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod csv;
pub mod handlers;
pub mod routes;

pub use handlers::{
    AddressInput, ApiError, AppState, ErrorResponse, HealthResponse, QuoteRequest,
};
pub use routes::create_router;
