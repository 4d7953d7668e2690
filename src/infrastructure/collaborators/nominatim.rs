//! # Nominatim Geocoder
//!
//! [`Geocoder`] adapter for Nominatim-compatible search APIs.
//!
//! Issues `GET {base_url}/search?q=<query>&format=jsonv2&limit=1` and takes
//! the first hit. Nominatim encodes coordinates as strings:
//!
//! ```json
//! [{ "lat": "10.7769", "lon": "106.7009", "display_name": "..." }]
//! ```

use crate::domain::value_objects::GeoPoint;
use crate::infrastructure::collaborators::error::{CollaboratorError, CollaboratorResult};
use crate::infrastructure::collaborators::http_client::HttpClient;
use crate::infrastructure::collaborators::traits::Geocoder;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimConfig {
    base_url: String,
    timeout_ms: u64,
    user_agent: String,
}

impl NominatimConfig {
    /// Creates a config for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: 3000,
            user_agent: concat!("parcel-quote/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL of the service.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn into_point(self) -> CollaboratorResult<GeoPoint> {
        let lat = self.lat.trim().parse::<f64>().map_err(|e| {
            CollaboratorError::protocol_error(format!("bad latitude '{}': {}", self.lat, e))
        })?;
        let lon = self.lon.trim().parse::<f64>().map_err(|e| {
            CollaboratorError::protocol_error(format!("bad longitude '{}': {}", self.lon, e))
        })?;
        GeoPoint::new(lat, lon).map_err(|e| CollaboratorError::protocol_error(e.to_string()))
    }
}

/// Geocoder backed by a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    search_url: String,
    http_client: HttpClient,
}

impl NominatimGeocoder {
    /// Creates a geocoder.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InternalError` if the HTTP client cannot
    /// be created.
    pub fn new(config: &NominatimConfig) -> CollaboratorResult<Self> {
        let http_client = HttpClient::new(config.timeout_ms, &config.user_agent)?;
        Ok(Self {
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
            http_client,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> CollaboratorResult<GeoPoint> {
        let params = [("q", query), ("format", "jsonv2"), ("limit", "1")];
        let places: Vec<NominatimPlace> = self
            .http_client
            .get_with_params(&self.search_url, &params)
            .await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::not_found(format!("no match for '{}'", query)))?;

        debug!(
            query = %query,
            display_name = place.display_name.as_deref().unwrap_or(""),
            "Geocoded address"
        );
        place.into_point()
    }
}
