//! # Application Services
//!
//! Services that orchestrate domain logic and collaborators.
//!
//! - [`FeeEstimator`]: The estimation pipeline and comparison table
//! - [`CoordinateResolver`]: Address geocoding with country qualifier
//! - [`RouteDistanceCalculator`]: Routed distance with great-circle fallback

pub mod coordinate_resolver;
pub mod fee_estimation;
pub mod route_distance;

pub use coordinate_resolver::CoordinateResolver;
pub use fee_estimation::{EstimatorOptions, FeeEstimator, PricingBasis};
pub use route_distance::RouteDistanceCalculator;
