//! # Geographic Points
//!
//! [`GeoPoint`] is a validated WGS84 coordinate; [`Location`] is one leg of a
//! shipment, which may still need geocoding or may be unresolvable.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::geo_point::{GeoPoint, Location};
//!
//! let point = GeoPoint::new(10.77, 106.70).unwrap();
//! assert_eq!(point.latitude(), 10.77);
//!
//! // Half a coordinate is no coordinate.
//! assert!(GeoPoint::from_parts(Some(10.77), None).is_none());
//!
//! let leg = Location::address("227 Nguyen Van Cu, District 5");
//! assert!(leg.needs_geocoding());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
///
/// # Invariants
///
/// - Both components are finite
/// - Latitude is within [-90, 90]
/// - Longitude is within [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = DomainError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either component is not
    /// finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::invalid_coordinate(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinate(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a point only when both halves are present and valid.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// Returns the latitude in degrees.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// One leg (pickup or delivery) of a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Location {
    /// Coordinate already known (e.g. chosen in an address picker).
    Point(GeoPoint),
    /// Free-text address that must be geocoded.
    Address(String),
    /// Nothing usable; the quote degrades to an unknown distance.
    Unresolved,
}

impl Location {
    /// Creates a location from a known point.
    #[must_use]
    pub fn point(point: GeoPoint) -> Self {
        Self::Point(point)
    }

    /// Creates a location from address text. Blank text is unresolved.
    #[must_use]
    pub fn address(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Unresolved
        } else {
            Self::Address(text)
        }
    }

    /// Picks the best available representation of a leg.
    ///
    /// A complete coordinate wins over address text; a half coordinate is
    /// ignored.
    #[must_use]
    pub fn from_inputs(
        latitude: Option<f64>,
        longitude: Option<f64>,
        address: Option<String>,
    ) -> Self {
        if let Some(point) = GeoPoint::from_parts(latitude, longitude) {
            return Self::Point(point);
        }
        address.map_or(Self::Unresolved, Self::address)
    }

    /// Returns the point, if already resolved.
    #[must_use]
    pub fn as_point(&self) -> Option<GeoPoint> {
        match self {
            Self::Point(point) => Some(*point),
            _ => None,
        }
    }

    /// Returns true if this leg is address text awaiting geocoding.
    #[must_use]
    pub fn needs_geocoding(&self) -> bool {
        matches!(self, Self::Address(_))
    }
}

impl From<GeoPoint> for Location {
    fn from(point: GeoPoint) -> Self {
        Self::Point(point)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(point) => write!(f, "{}", point),
            Self::Address(text) => write!(f, "'{}'", text),
            Self::Unresolved => write!(f, "<unresolved>"),
        }
    }
}
