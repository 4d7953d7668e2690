//! # Route Distance
//!
//! Measures the distance between two resolved points and prices it.
//!
//! # Fallback Chain
//!
//! ```text
//! Routed path (>= 2 waypoints) → Great-circle line
//! ```
//!
//! A routing failure, timeout, or a path with fewer than two waypoints
//! falls back to the straight great-circle distance. The calculator never
//! fails.

use crate::domain::services::great_circle::{great_circle_km, path_length_km};
use crate::domain::value_objects::{DistanceQuote, DistanceSource, GeoPoint};
use crate::infrastructure::collaborators::traits::{DistanceFeeClassifier, RoutingService};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Computes and classifies travel distances.
#[derive(Debug, Clone)]
pub struct RouteDistanceCalculator {
    router: Arc<dyn RoutingService>,
    classifier: Arc<dyn DistanceFeeClassifier>,
    timeout_ms: u64,
}

impl RouteDistanceCalculator {
    /// Creates a calculator.
    #[must_use]
    pub fn new(
        router: Arc<dyn RoutingService>,
        classifier: Arc<dyn DistanceFeeClassifier>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            router,
            classifier,
            timeout_ms,
        }
    }

    /// Distance in kilometres and how it was obtained.
    pub async fn measure(&self, origin: GeoPoint, destination: GeoPoint) -> (f64, DistanceSource) {
        let routed = timeout(
            Duration::from_millis(self.timeout_ms),
            self.router.route(origin, destination),
        )
        .await;

        match routed {
            Ok(Ok(waypoints)) if waypoints.len() >= 2 => {
                (path_length_km(&waypoints), DistanceSource::Route)
            }
            Ok(Ok(waypoints)) => {
                warn!(
                    waypoints = waypoints.len(),
                    "Route too short, using great-circle distance"
                );
                (great_circle_km(origin, destination), DistanceSource::GreatCircle)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Routing failed, using great-circle distance");
                (great_circle_km(origin, destination), DistanceSource::GreatCircle)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout_ms,
                    "Routing timed out, using great-circle distance"
                );
                (great_circle_km(origin, destination), DistanceSource::GreatCircle)
            }
        }
    }

    /// Measures and classifies the distance between two points.
    pub async fn distance_between(&self, origin: GeoPoint, destination: GeoPoint) -> DistanceQuote {
        let (km, source) = self.measure(origin, destination).await;
        let fee = self.classifier.classify(km);
        debug!(
            km,
            source = %source,
            region = fee.region(),
            surcharge = %fee.surcharge(),
            "Distance classified"
        );
        DistanceQuote::new(km, fee, source)
    }
}
