//! # Fee Quote
//!
//! The priced result of an estimate, and the side-by-side comparison across
//! every service class.
//!
//! A [`FeeQuote`] can only be built through [`FeeQuote::compose`], which
//! applies the pricing formula:
//!
//! ```text
//! total_fee = round(base_fee * service_multiplier + distance_fee)
//! ```
//!
//! rounded half away from zero to whole currency units.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::fee_quote::FeeQuote;
//! use parcel_quote::domain::value_objects::{DistanceFee, DistanceQuote, DistanceSource, ServiceClass};
//! use rust_decimal::Decimal;
//!
//! let distance = DistanceQuote::new(
//!     6.4,
//!     DistanceFee::new(Decimal::new(5000, 0), "Intracity"),
//!     DistanceSource::GreatCircle,
//! );
//! let quote = FeeQuote::compose(
//!     ServiceClass::Express,
//!     Decimal::new(20000, 0),
//!     Decimal::new(15, 1),
//!     &distance,
//! ).unwrap();
//! assert_eq!(quote.total_fee(), Decimal::new(35000, 0));
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    round_fee, CheckedArithmetic, DistanceQuote, DistanceSource, ServiceClass,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price quote for one service class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    service_class: ServiceClass,
    total_fee: Decimal,
    base_fee: Decimal,
    distance_fee: Decimal,
    service_multiplier: Decimal,
    distance_km: f64,
    region: String,
    distance_source: DistanceSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requested_service_class: Option<String>,
}

impl FeeQuote {
    /// Prices a service class on top of a base fee and a distance quote.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on decimal overflow.
    pub fn compose(
        service_class: ServiceClass,
        base_fee: Decimal,
        service_multiplier: Decimal,
        distance: &DistanceQuote,
    ) -> DomainResult<Self> {
        let scaled = base_fee.safe_mul(service_multiplier)?;
        let total_fee = round_fee(scaled.safe_add(distance.fee())?);
        Ok(Self {
            service_class,
            total_fee,
            base_fee,
            distance_fee: distance.fee(),
            service_multiplier,
            distance_km: distance.km(),
            region: distance.region().to_string(),
            distance_source: distance.source(),
            requested_service_class: None,
        })
    }

    /// Records the unrecognized class name this quote was substituted for.
    #[must_use]
    pub fn substituted_for(mut self, requested: impl Into<String>) -> Self {
        self.requested_service_class = Some(requested.into());
        self
    }

    /// Service class this quote prices.
    #[inline]
    #[must_use]
    pub fn service_class(&self) -> ServiceClass {
        self.service_class
    }

    /// Final price in whole currency units.
    #[inline]
    #[must_use]
    pub fn total_fee(&self) -> Decimal {
        self.total_fee
    }

    /// Cargo fee before the service multiplier.
    #[inline]
    #[must_use]
    pub fn base_fee(&self) -> Decimal {
        self.base_fee
    }

    /// Distance surcharge.
    #[inline]
    #[must_use]
    pub fn distance_fee(&self) -> Decimal {
        self.distance_fee
    }

    /// Multiplier applied to the base fee.
    #[inline]
    #[must_use]
    pub fn service_multiplier(&self) -> Decimal {
        self.service_multiplier
    }

    /// Distance in kilometres (0 when unavailable).
    #[inline]
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Region label of the distance tier.
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// How the distance was measured.
    #[inline]
    #[must_use]
    pub fn distance_source(&self) -> DistanceSource {
        self.distance_source
    }

    /// Class name the caller asked for, when it was not recognized and the
    /// baseline was priced instead.
    #[inline]
    #[must_use]
    pub fn requested_service_class(&self) -> Option<&str> {
        self.requested_service_class.as_deref()
    }

    /// True if this quote stands in for an unrecognized class name.
    #[inline]
    #[must_use]
    pub fn is_substituted(&self) -> bool {
        self.requested_service_class.is_some()
    }
}

impl fmt::Display for FeeQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} x {} + {}, {:.2}km {})",
            self.service_class,
            self.total_fee,
            self.base_fee,
            self.service_multiplier,
            self.distance_fee,
            self.distance_km,
            self.region
        )
    }
}

/// Quotes for every service class, in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteComparison {
    quotes: Vec<FeeQuote>,
}

impl QuoteComparison {
    /// Wraps quotes already in table order.
    #[must_use]
    pub fn new(quotes: Vec<FeeQuote>) -> Self {
        Self { quotes }
    }

    /// The quote for a class, if present.
    #[must_use]
    pub fn get(&self, class: ServiceClass) -> Option<&FeeQuote> {
        self.quotes.iter().find(|q| q.service_class() == class)
    }

    /// The lowest-priced quote; ties keep table order.
    #[must_use]
    pub fn cheapest(&self) -> Option<&FeeQuote> {
        self.quotes
            .iter()
            .reduce(|best, q| if q.total_fee() < best.total_fee() { q } else { best })
    }

    /// Number of quotes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if there are no quotes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates quotes in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeeQuote> {
        self.quotes.iter()
    }

    /// Unwraps the quotes.
    #[must_use]
    pub fn into_inner(self) -> Vec<FeeQuote> {
        self.quotes
    }
}

impl<'a> IntoIterator for &'a QuoteComparison {
    type Item = &'a FeeQuote;
    type IntoIter = std::slice::Iter<'a, FeeQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
