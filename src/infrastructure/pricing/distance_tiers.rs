//! # Distance Tiers
//!
//! Table-driven [`DistanceFeeClassifier`].
//!
//! Tiers are checked in order; the first tier whose upper bound is at least
//! the distance wins. The last tier has no upper bound so every distance is
//! classified.
//!
//! | Up to     | Region      | Surcharge |
//! |-----------|-------------|-----------|
//! | 15 km     | Intracity   | 5 000     |
//! | 50 km     | Suburban    | 15 000    |
//! | 300 km    | Intraregion | 30 000    |
//! | (no cap)  | Interregion | 50 000    |
//!
//! # Examples
//!
//! ```
//! use parcel_quote::infrastructure::collaborators::DistanceFeeClassifier;
//! use parcel_quote::infrastructure::pricing::TieredDistanceFeeClassifier;
//! use rust_decimal::Decimal;
//!
//! let classifier = TieredDistanceFeeClassifier::default();
//! let fee = classifier.classify(6.4);
//! assert_eq!(fee.region(), "Intracity");
//! assert_eq!(fee.surcharge(), Decimal::new(5000, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::DistanceFee;
use crate::infrastructure::collaborators::traits::DistanceFeeClassifier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the distance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    /// Inclusive upper bound in kilometres; `None` means unbounded.
    pub up_to_km: Option<f64>,
    /// Surcharge for distances in this tier.
    pub surcharge: Decimal,
    /// Region label.
    pub region: String,
}

impl DistanceTier {
    /// Creates a bounded tier.
    #[must_use]
    pub fn up_to(km: f64, surcharge: Decimal, region: impl Into<String>) -> Self {
        Self {
            up_to_km: Some(km),
            surcharge,
            region: region.into(),
        }
    }

    /// Creates the open-ended last tier.
    #[must_use]
    pub fn beyond(surcharge: Decimal, region: impl Into<String>) -> Self {
        Self {
            up_to_km: None,
            surcharge,
            region: region.into(),
        }
    }

    fn contains(&self, km: f64) -> bool {
        self.up_to_km.is_none_or(|bound| km <= bound)
    }
}

/// Distance classifier backed by an ordered tier table.
///
/// # Invariants
///
/// - At least one tier
/// - Bounds are finite, non-negative and strictly increasing
/// - Only the last tier is open-ended, and it must be
/// - Surcharges are non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct TieredDistanceFeeClassifier {
    tiers: Vec<DistanceTier>,
}

impl TieredDistanceFeeClassifier {
    /// Creates a classifier from a validated tier table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingTable` if any invariant is broken.
    pub fn new(tiers: Vec<DistanceTier>) -> DomainResult<Self> {
        let last_index = tiers
            .len()
            .checked_sub(1)
            .ok_or_else(|| DomainError::invalid_pricing_table("distance table is empty"))?;

        let mut previous: Option<f64> = None;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.surcharge < Decimal::ZERO {
                return Err(DomainError::invalid_pricing_table(format!(
                    "surcharge for '{}' must not be negative",
                    tier.region
                )));
            }
            match (tier.up_to_km, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(DomainError::invalid_pricing_table(format!(
                        "only the last tier may be open-ended, '{}' is not last",
                        tier.region
                    )));
                }
                (Some(_), true) => {
                    return Err(DomainError::invalid_pricing_table(
                        "last distance tier must be open-ended",
                    ));
                }
                (Some(bound), false) => {
                    if !bound.is_finite() || bound < 0.0 {
                        return Err(DomainError::invalid_pricing_table(format!(
                            "bound for '{}' must be a non-negative number",
                            tier.region
                        )));
                    }
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(DomainError::invalid_pricing_table(format!(
                            "bound for '{}' must be greater than the previous tier",
                            tier.region
                        )));
                    }
                    previous = Some(bound);
                }
            }
        }

        Ok(Self { tiers })
    }

    /// Returns the tiers in order.
    #[must_use]
    pub fn tiers(&self) -> &[DistanceTier] {
        &self.tiers
    }
}

impl Default for TieredDistanceFeeClassifier {
    fn default() -> Self {
        Self {
            tiers: vec![
                DistanceTier::up_to(15.0, Decimal::new(5000, 0), "Intracity"),
                DistanceTier::up_to(50.0, Decimal::new(15000, 0), "Suburban"),
                DistanceTier::up_to(300.0, Decimal::new(30000, 0), "Intraregion"),
                DistanceTier::beyond(Decimal::new(50000, 0), "Interregion"),
            ],
        }
    }
}

impl DistanceFeeClassifier for TieredDistanceFeeClassifier {
    fn classify(&self, km: f64) -> DistanceFee {
        let km = if km.is_nan() || km < 0.0 { 0.0 } else { km };
        self.tiers
            .iter()
            .find(|tier| tier.contains(km))
            .map_or_else(DistanceFee::unknown, |tier| {
                DistanceFee::new(tier.surcharge, tier.region.clone())
            })
    }
}
