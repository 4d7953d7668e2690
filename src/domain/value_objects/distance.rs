//! # Distance Pricing
//!
//! Value objects describing a priced distance.
//!
//! - [`DistanceFee`] - Surcharge and region label for a distance tier
//! - [`DistanceQuote`] - A measured distance together with its tier
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::distance::{DistanceFee, DistanceQuote};
//! use parcel_quote::domain::value_objects::enums::DistanceSource;
//! use rust_decimal::Decimal;
//!
//! let unknown = DistanceQuote::unavailable();
//! assert_eq!(unknown.region(), "Unknown");
//! assert_eq!(unknown.fee(), Decimal::ZERO);
//! assert_eq!(unknown.source(), DistanceSource::Unavailable);
//! ```

use crate::domain::value_objects::enums::DistanceSource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Region label used when no distance could be measured.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Output of a distance classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceFee {
    surcharge: Decimal,
    region: String,
}

impl DistanceFee {
    /// Creates a distance fee.
    #[must_use]
    pub fn new(surcharge: Decimal, region: impl Into<String>) -> Self {
        Self {
            surcharge,
            region: region.into(),
        }
    }

    /// The "no distance" fee: zero surcharge, region `Unknown`.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Decimal::ZERO, UNKNOWN_REGION)
    }

    /// Surcharge in currency units.
    #[inline]
    #[must_use]
    pub fn surcharge(&self) -> Decimal {
        self.surcharge
    }

    /// Region label.
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for DistanceFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{})", self.region, self.surcharge)
    }
}

/// A distance in kilometres with the fee tier it falls into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceQuote {
    km: f64,
    fee: DistanceFee,
    source: DistanceSource,
}

impl DistanceQuote {
    /// Creates a distance quote.
    #[must_use]
    pub fn new(km: f64, fee: DistanceFee, source: DistanceSource) -> Self {
        Self { km, fee, source }
    }

    /// Quote for a shipment with an unresolved leg.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(0.0, DistanceFee::unknown(), DistanceSource::Unavailable)
    }

    /// Distance in kilometres.
    #[inline]
    #[must_use]
    pub fn km(&self) -> f64 {
        self.km
    }

    /// Distance surcharge.
    #[inline]
    #[must_use]
    pub fn fee(&self) -> Decimal {
        self.fee.surcharge()
    }

    /// Region label.
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        self.fee.region()
    }

    /// How the distance was measured.
    #[inline]
    #[must_use]
    pub fn source(&self) -> DistanceSource {
        self.source
    }
}

impl fmt::Display for DistanceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}km {} via {}", self.km, self.fee, self.source)
    }
}
