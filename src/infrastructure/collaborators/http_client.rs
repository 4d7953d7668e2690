//! # HTTP Client Utilities
//!
//! Shared HTTP client for the geocoding and routing adapters.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - Configurable timeouts
//! - A fixed `User-Agent` (public geocoders reject anonymous clients)
//! - JSON deserialization
//! - Status code to [`CollaboratorError`] mapping
//!
//! # Examples
//!
//! ```ignore
//! use parcel_quote::infrastructure::collaborators::http_client::HttpClient;
//!
//! let client = HttpClient::new(3000, "parcel-quote/0.1")?;
//! let response: Vec<Place> = client.get_with_params(&url, &[("q", "Hanoi")]).await?;
//! ```

use crate::infrastructure::collaborators::error::{CollaboratorError, CollaboratorResult};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for collaborator adapters.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InternalError` if the client cannot be
    /// created.
    pub fn new(timeout_ms: u64, user_agent: &str) -> CollaboratorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                CollaboratorError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::Timeout`/`Connection` if the request fails
    /// and `CollaboratorError::ProtocolError` if the response cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> CollaboratorResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> CollaboratorResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> CollaboratorResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                CollaboratorError::protocol_error(format!("Failed to parse response: {}", e))
            })
        } else {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000));
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body, retry_after_ms))
        }
    }

    /// Maps a reqwest error to a CollaboratorError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CollaboratorError {
        if error.is_timeout() {
            CollaboratorError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CollaboratorError::connection(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            CollaboratorError::protocol_error(format!("Failed to decode response: {}", error))
        } else {
            CollaboratorError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

/// Maps an HTTP status code to a CollaboratorError.
fn map_status_error(status: StatusCode, body: &str, retry_after_ms: Option<u64>) -> CollaboratorError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            CollaboratorError::invalid_request(format!("Bad request: {}", body))
        }
        StatusCode::NOT_FOUND => {
            CollaboratorError::protocol_error(format!("Resource not found: {}", body))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            CollaboratorError::rate_limited("Rate limit exceeded", retry_after_ms)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CollaboratorError::timeout(format!("Upstream timeout ({}): {}", status, body))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => {
            CollaboratorError::connection(format!("Server error ({}): {}", status, body))
        }
        _ => CollaboratorError::protocol_error(format!("HTTP error ({}): {}", status, body)),
    }
}
