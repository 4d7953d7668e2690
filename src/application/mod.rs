//! # Application Layer
//!
//! The estimation pipeline built on the domain types and collaborator ports.
//!
//! - [`services`]: Fee estimator, coordinate resolver, route distance
//! - [`error`]: `EstimationError` and `GeocodeFailure`

pub mod error;
pub mod services;

pub use error::{EstimationError, EstimationResult, GeocodeFailure};
pub use services::{EstimatorOptions, FeeEstimator, PricingBasis};
