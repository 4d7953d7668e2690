//! # Collaborator Ports
//!
//! Trait definitions for everything the estimator depends on but does not
//! own: geocoding, routing, and the two pricing tables.
//!
//! The network-facing ports ([`Geocoder`], [`RoutingService`]) are async and
//! fallible. The pricing ports are synchronous: [`DistanceFeeClassifier`] is
//! total, [`CargoFeeEvaluator`] fails only when the fee leaves the
//! representable range.
//!
//! # Examples
//!
//! ```ignore
//! use parcel_quote::infrastructure::collaborators::traits::Geocoder;
//! use parcel_quote::infrastructure::collaborators::error::CollaboratorResult;
//!
//! #[derive(Debug)]
//! struct MyGeocoder;
//!
//! #[async_trait::async_trait]
//! impl Geocoder for MyGeocoder {
//!     async fn geocode(&self, query: &str) -> CollaboratorResult<GeoPoint> { /* ... */ }
//! }
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{CargoLineItem, DistanceFee, GeoPoint};
use crate::infrastructure::collaborators::error::CollaboratorResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// Turns free-text addresses into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + fmt::Debug {
    /// Looks up the best match for a query.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::NotFound` - No match
    /// - `CollaboratorError::Timeout` / `Connection` - Transport failure
    /// - `CollaboratorError::ProtocolError` - Malformed response
    async fn geocode(&self, query: &str) -> CollaboratorResult<GeoPoint>;
}

/// Produces a travel path between two points.
#[async_trait]
pub trait RoutingService: Send + Sync + fmt::Debug {
    /// Returns the ordered waypoints of a path from `origin` to
    /// `destination`.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::RouteUnavailable` - No path
    /// - `CollaboratorError::Timeout` / `Connection` - Transport failure
    /// - `CollaboratorError::ProtocolError` - Malformed response
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> CollaboratorResult<Vec<GeoPoint>>;
}

/// Maps a distance to a surcharge and a region label.
pub trait DistanceFeeClassifier: Send + Sync + fmt::Debug {
    /// Classifies a non-negative distance in kilometres.
    fn classify(&self, km: f64) -> DistanceFee;
}

/// Prices cargo independently of distance and service class.
pub trait CargoFeeEvaluator: Send + Sync + fmt::Debug {
    /// Base fee for the cargo; `fragile` is true if any item is fragile.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if the fee does not fit a `Decimal`.
    fn base_fee(&self, items: &[CargoLineItem], fragile: bool) -> DomainResult<Decimal>;
}
