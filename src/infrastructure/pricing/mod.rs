//! # Pricing Tables
//!
//! Configurable table implementations of the pricing ports.
//!
//! - [`TieredDistanceFeeClassifier`]: Distance tiers with region labels
//! - [`WeightBandCargoFeeEvaluator`]: Weight bands with volumetric weight

pub mod cargo_fees;
pub mod distance_tiers;

pub use cargo_fees::{WeightBand, WeightBandCargoFeeEvaluator};
pub use distance_tiers::{DistanceTier, TieredDistanceFeeClassifier};
