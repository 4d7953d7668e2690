//! # Fee Estimation
//!
//! Orchestrates the pipeline that turns a shipment into price quotes.
//!
//! ```text
//! validate cargo → base fee
//!   → resolve legs (geocode address text)
//!   → route distance (great-circle fallback) → distance tier
//!   → per service class: round(base_fee * multiplier + distance_fee)
//! ```
//!
//! Everything before the last step is independent of the service class and
//! is captured in a [`PricingBasis`]. A comparison across all service classes
//! builds the basis once and prices every class from it, so collaborators
//! are called at most once per leg and once for the route.
//!
//! # Examples
//!
//! ```ignore
//! let estimator = FeeEstimator::new(geocoder, router, classifier, evaluator,
//!     ServiceMultiplierTable::default(), EstimatorOptions::default());
//! let comparison = estimator.estimate_all_service_classes(&shipment).await?;
//! println!("cheapest: {}", comparison.cheapest().unwrap());
//! ```

use crate::application::error::{EstimationError, EstimationResult};
use crate::application::services::coordinate_resolver::CoordinateResolver;
use crate::application::services::route_distance::RouteDistanceCalculator;
use crate::domain::entities::{FeeQuote, FeeQuoteRequest, QuoteComparison, Shipment};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    DistanceQuote, ServiceClass, ServiceMultiplierTable,
};
use crate::infrastructure::collaborators::traits::{
    CargoFeeEvaluator, DistanceFeeClassifier, Geocoder, RoutingService,
};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Timeouts and geocoding options for a [`FeeEstimator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorOptions {
    /// Country appended to address text before geocoding.
    pub country_qualifier: Option<String>,
    /// Per-request geocoding timeout in milliseconds.
    pub geocode_timeout_ms: u64,
    /// Per-request routing timeout in milliseconds.
    pub route_timeout_ms: u64,
    /// Deadline for a whole estimate call in milliseconds.
    pub estimate_timeout_ms: u64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            country_qualifier: None,
            geocode_timeout_ms: 3000,
            route_timeout_ms: 5000,
            estimate_timeout_ms: 10000,
        }
    }
}

impl EstimatorOptions {
    /// Sets the country qualifier.
    #[must_use]
    pub fn with_country_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.country_qualifier = Some(qualifier.into());
        self
    }

    /// Sets the per-request geocoding timeout.
    #[must_use]
    pub fn with_geocode_timeout(mut self, timeout_ms: u64) -> Self {
        self.geocode_timeout_ms = timeout_ms;
        self
    }

    /// Sets the per-request routing timeout.
    #[must_use]
    pub fn with_route_timeout(mut self, timeout_ms: u64) -> Self {
        self.route_timeout_ms = timeout_ms;
        self
    }

    /// Sets the whole-call deadline.
    #[must_use]
    pub fn with_estimate_timeout(mut self, timeout_ms: u64) -> Self {
        self.estimate_timeout_ms = timeout_ms;
        self
    }
}

/// The service-class-independent part of a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBasis {
    base_fee: Decimal,
    distance: DistanceQuote,
}

impl PricingBasis {
    /// Creates a basis.
    #[must_use]
    pub fn new(base_fee: Decimal, distance: DistanceQuote) -> Self {
        Self { base_fee, distance }
    }

    /// Cargo fee before the service multiplier.
    #[inline]
    #[must_use]
    pub fn base_fee(&self) -> Decimal {
        self.base_fee
    }

    /// Priced distance.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> &DistanceQuote {
        &self.distance
    }

    /// Prices one service class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on decimal overflow.
    pub fn quote(&self, class: ServiceClass, multiplier: Decimal) -> DomainResult<FeeQuote> {
        FeeQuote::compose(class, self.base_fee, multiplier, &self.distance)
    }

    /// Prices every class in table order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on decimal overflow.
    pub fn quote_all(&self, table: &ServiceMultiplierTable) -> DomainResult<QuoteComparison> {
        table
            .iter()
            .map(|(class, multiplier)| self.quote(class, multiplier))
            .collect::<DomainResult<Vec<_>>>()
            .map(QuoteComparison::new)
    }
}

/// Shipping fee estimator.
///
/// Holds no per-call state and can be shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FeeEstimator {
    resolver: CoordinateResolver,
    distance: RouteDistanceCalculator,
    cargo_fees: Arc<dyn CargoFeeEvaluator>,
    multipliers: ServiceMultiplierTable,
    estimate_timeout_ms: u64,
}

impl FeeEstimator {
    /// Wires an estimator from its collaborators.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RoutingService>,
        classifier: Arc<dyn DistanceFeeClassifier>,
        cargo_fees: Arc<dyn CargoFeeEvaluator>,
        multipliers: ServiceMultiplierTable,
        options: EstimatorOptions,
    ) -> Self {
        let resolver = CoordinateResolver::new(geocoder, options.geocode_timeout_ms)
            .with_country_qualifier(options.country_qualifier);
        let distance = RouteDistanceCalculator::new(router, classifier, options.route_timeout_ms);
        Self {
            resolver,
            distance,
            cargo_fees,
            multipliers,
            estimate_timeout_ms: options.estimate_timeout_ms,
        }
    }

    /// Returns the multiplier table.
    #[must_use]
    pub fn multipliers(&self) -> &ServiceMultiplierTable {
        &self.multipliers
    }

    /// Estimates the fee for one service class.
    ///
    /// # Errors
    ///
    /// - `EstimationError::Domain` - invalid cargo or arithmetic overflow
    /// - `EstimationError::Timeout` - the call exceeded its deadline
    pub async fn estimate(&self, request: &FeeQuoteRequest) -> EstimationResult<FeeQuote> {
        let class = request.service_class();
        self.with_deadline(async {
            let basis = self.pricing_basis(request.shipment()).await?;
            Ok(basis.quote(class, self.multipliers.multiplier_for(class))?)
        })
        .await
    }

    /// Estimates the fee for every service class.
    ///
    /// Coordinates, distance and base fee are computed once; only the
    /// multiplier step is repeated.
    ///
    /// # Errors
    ///
    /// Same as [`FeeEstimator::estimate`]. Either the whole comparison is
    /// returned or a single error.
    pub async fn estimate_all_service_classes(
        &self,
        shipment: &Shipment,
    ) -> EstimationResult<QuoteComparison> {
        self.with_deadline(async {
            let basis = self.pricing_basis(shipment).await?;
            Ok(basis.quote_all(&self.multipliers)?)
        })
        .await
    }

    /// Estimates using a service class given by name.
    ///
    /// Unrecognized names are priced at the 1.0 baseline and labelled
    /// `STANDARD`; the returned quote keeps the requested name in
    /// [`FeeQuote::requested_service_class`].
    ///
    /// # Errors
    ///
    /// Same as [`FeeEstimator::estimate`].
    pub async fn estimate_by_key(
        &self,
        shipment: &Shipment,
        service_class: &str,
    ) -> EstimationResult<FeeQuote> {
        let (class, multiplier, substituted) = match service_class.parse::<ServiceClass>() {
            Ok(class) => (class, self.multipliers.multiplier_for(class), false),
            Err(e) => {
                warn!(error = %e, "Unrecognized service class, using baseline multiplier");
                (ServiceClass::Standard, Decimal::ONE, true)
            }
        };
        let quote = self
            .with_deadline(async {
                let basis = self.pricing_basis(shipment).await?;
                Ok(basis.quote(class, multiplier)?)
            })
            .await?;
        Ok(if substituted {
            quote.substituted_for(service_class)
        } else {
            quote
        })
    }

    /// Computes the service-class-independent part of a quote.
    ///
    /// No deadline is applied; callers wrap it as needed.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::Domain` if the cargo is invalid.
    pub async fn pricing_basis(&self, shipment: &Shipment) -> EstimationResult<PricingBasis> {
        shipment.validate()?;
        let base_fee = self
            .cargo_fees
            .base_fee(shipment.cargo(), shipment.is_fragile())?;

        let (pickup, delivery) = tokio::join!(
            self.resolver.resolve_location(shipment.pickup()),
            self.resolver.resolve_location(shipment.delivery()),
        );

        let distance = match (pickup, delivery) {
            (Some(origin), Some(destination)) => {
                self.distance.distance_between(origin, destination).await
            }
            _ => {
                warn!(
                    pickup_resolved = pickup.is_some(),
                    delivery_resolved = delivery.is_some(),
                    "Missing coordinates, distance unavailable"
                );
                DistanceQuote::unavailable()
            }
        };

        debug!(base_fee = %base_fee, distance = %distance, "Pricing basis computed");
        Ok(PricingBasis::new(base_fee, distance))
    }

    async fn with_deadline<T>(
        &self,
        work: impl Future<Output = EstimationResult<T>>,
    ) -> EstimationResult<T> {
        timeout(Duration::from_millis(self.estimate_timeout_ms), work)
            .await
            .unwrap_or_else(|_| {
                warn!(timeout_ms = self.estimate_timeout_ms, "Estimate timed out");
                Err(EstimationError::timeout(self.estimate_timeout_ms))
            })
    }
}
