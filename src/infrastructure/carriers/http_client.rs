//! # HTTP Client Utilities
//!
//! Shared HTTP client wrapper for carrier integrations.
//!
//! Provides JSON POST with a bounded per-request timeout and uniform
//! mapping of wire failures onto [`CarrierError`]. The timeout is the
//! required bound on in-flight carrier calls: an unreachable carrier turns
//! into a `Timeout`/`Connection` error instead of a hung request.

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for carrier clients.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CarrierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                CarrierError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a POST request with a JSON body and bearer authorization,
    /// deserializing the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout`/`Connection` if the request fails,
    /// a status-classified error for non-2xx responses, and
    /// `CarrierError::MalformedResponse` if the body cannot be parsed.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        bearer_token: &str,
        body: &B,
    ) -> CarrierResult<T> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer_token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> CarrierResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                CarrierError::malformed_response(format!("failed to parse response: {}", e))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }

    /// Maps a reqwest error to a CarrierError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

/// Maps an HTTP status code to a CarrierError.
fn map_status_error(status: StatusCode, body: &str) -> CarrierError {
    match status {
        StatusCode::BAD_REQUEST => CarrierError::invalid_request(format!("bad request: {}", body)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CarrierError::authentication(format!("authentication failed: {}", body))
        }
        StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("rate limit exceeded"),
        _ => CarrierError::status(status.as_u16(), body.to_owned()),
    }
}
