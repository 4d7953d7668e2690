//! # Coordinate Resolver
//!
//! Turns address text into a [`GeoPoint`] through a [`Geocoder`].
//!
//! Address text is qualified with a configured country name before it is
//! sent (`"District 1"` becomes `"District 1, Vietnam"`) unless the text
//! already mentions it. Every lookup is bounded by a timeout.

use crate::application::error::GeocodeFailure;
use crate::domain::value_objects::{GeoPoint, Location};
use crate::infrastructure::collaborators::traits::Geocoder;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Resolves addresses to coordinates.
#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    geocoder: Arc<dyn Geocoder>,
    country_qualifier: Option<String>,
    timeout_ms: u64,
}

impl CoordinateResolver {
    /// Creates a resolver without a country qualifier.
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>, timeout_ms: u64) -> Self {
        Self {
            geocoder,
            country_qualifier: None,
            timeout_ms,
        }
    }

    /// Sets the country qualifier. Blank values disable qualifying.
    #[must_use]
    pub fn with_country_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.country_qualifier = qualifier
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        self
    }

    /// Returns the configured qualifier.
    #[must_use]
    pub fn country_qualifier(&self) -> Option<&str> {
        self.country_qualifier.as_deref()
    }

    /// Builds the geocoder query for an address.
    #[must_use]
    pub fn qualify(&self, address: &str) -> String {
        let address = address.trim();
        match &self.country_qualifier {
            Some(qualifier)
                if !address
                    .to_lowercase()
                    .contains(&qualifier.to_lowercase()) =>
            {
                format!("{}, {}", address, qualifier)
            }
            _ => address.to_string(),
        }
    }

    /// Geocodes an address.
    ///
    /// # Errors
    ///
    /// - `GeocodeFailure::BlankAddress` - nothing to look up
    /// - `GeocodeFailure::Timeout` - geocoder too slow
    /// - `GeocodeFailure::Collaborator` - geocoder error or no match
    pub async fn resolve(&self, address: &str) -> Result<GeoPoint, GeocodeFailure> {
        if address.trim().is_empty() {
            return Err(GeocodeFailure::BlankAddress);
        }
        let query = self.qualify(address);

        match timeout(
            Duration::from_millis(self.timeout_ms),
            self.geocoder.geocode(&query),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => Err(GeocodeFailure::Timeout {
                timeout_ms: self.timeout_ms,
            }),
        }
    }

    /// Resolves a shipment leg, degrading failures to `None`.
    pub async fn resolve_location(&self, location: &Location) -> Option<GeoPoint> {
        match location {
            Location::Point(point) => Some(*point),
            Location::Address(text) => match self.resolve(text).await {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!(address = %text, error = %e, "Geocoding failed, leg left unresolved");
                    None
                }
            },
            Location::Unresolved => None,
        }
    }
}
