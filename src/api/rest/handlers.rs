//! # REST Handlers
//!
//! Request handlers for the quote API.
//!
//! The handlers are a thin shell: token and shape checks here, everything
//! else delegated to the resolver and the bulk engine. Every error leaves
//! as `{ "error": "<message>" }` with the matching status code.

use crate::application::error::{BatchError, QuoteError};
use crate::application::services::bulk_engine::BulkQuoteEngine;
use crate::application::services::quote_resolver::QuoteResolver;
use crate::api::rest::csv;
use crate::domain::entities::address::{Address, AddressPair};
use crate::domain::entities::quote_record::QuoteRecord;
use crate::infrastructure::persistence::traits::{QuoteRepository, RepositoryError};
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Download filename for bulk results.
const BULK_RESULTS_FILENAME: &str = "bulk_shipping_results.csv";

/// Shared state injected into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Single-pair resolution service.
    pub resolver: QuoteResolver,
    /// Batch fan-out engine.
    pub engine: BulkQuoteEngine,
    /// Quote cache, for listing.
    pub repository: Arc<dyn QuoteRepository>,
}

/// JSON error body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// A status code plus JSON error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "missing or empty access token")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<QuoteError> for ApiError {
    fn from(e: QuoteError) -> Self {
        let status = match &e {
            QuoteError::Repository(_) | QuoteError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            QuoteError::MissingField { .. } | QuoteError::Carrier(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, e.to_string())
    }
}

impl From<BatchError> for ApiError {
    fn from(e: BatchError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        error!(error = %e, "quote store failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

/// One address in a single-quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressInput {
    /// Contact name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub addr: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

impl AddressInput {
    fn into_address(self) -> Result<Address, QuoteError> {
        Address::new(
            self.name, self.phone, self.addr, self.city, self.state, self.zip,
        )
        .map_err(|e| QuoteError::missing_field(e.field))
    }
}

/// Body of `POST /api/v1/quotes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Opaque carrier access token.
    pub access_token: String,
    /// Shipment origin.
    pub sender: AddressInput,
    /// Shipment destination.
    pub receiver: AddressInput,
}

/// Body of `GET /api/v1/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/v1/health` - liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// `POST /api/v1/quotes` - resolve one sender/receiver pair.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Response, ApiError> {
    let token = request.access_token.trim().to_owned();
    if token.is_empty() {
        return Err(ApiError::unauthorized());
    }

    let pair = AddressPair::new(
        request.sender.into_address()?,
        request.receiver.into_address()?,
    );

    let quote = state.resolver.resolve(&token, pair).await?;
    Ok(Json(quote).into_response())
}

/// `POST /api/v1/quotes/bulk` - resolve a CSV of rows, returning the
/// result CSV as an attachment.
pub async fn bulk_quotes(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;

    let rows = csv::parse_rows(&body)?;
    let report = state.engine.run(&token, rows).await?;
    let output = csv::write_report(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", BULK_RESULTS_FILENAME),
            ),
        ],
        output,
    )
        .into_response())
}

/// `GET /api/v1/quotes` - list all cached quote records.
pub async fn list_quotes(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuoteRecord>>, ApiError> {
    let records = state.repository.list().await?;
    Ok(Json(records))
}

/// Extracts a non-empty bearer token from the `Authorization` header.
///
/// Accepts both `Bearer <token>` and a bare token value.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123".to_owned()));
    }

    #[test]
    fn bearer_token_accepts_bare_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123".to_owned()));
    }

    #[test]
    fn bearer_token_rejects_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  "));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn quote_error_statuses() {
        let err = ApiError::from(QuoteError::missing_field("sender_zip"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from(QuoteError::unexpected("boom"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn batch_error_is_bad_request() {
        let err = ApiError::from(BatchError::Empty);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("no results"));
    }
}
