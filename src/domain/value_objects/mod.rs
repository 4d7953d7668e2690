//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Geography
//!
//! - [`GeoPoint`]: Validated latitude/longitude pair
//! - [`Location`]: A shipment leg (point, address text or unresolved)
//!
//! ## Cargo and Pricing
//!
//! - [`CargoLineItem`]: Weight, dimensions, fragility and quantity
//! - [`ServiceMultiplierTable`]: Per-service-class multipliers
//! - [`DistanceFee`], [`DistanceQuote`]: Priced distance tiers
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`round_fee`]: Whole-unit fee rounding
//!
//! ## Domain Enums
//!
//! - [`ServiceClass`]: Shipping service tier
//! - [`DistanceSource`]: How a distance was measured

pub mod arithmetic;
pub mod cargo;
pub mod distance;
pub mod enums;
pub mod geo_point;
pub mod service_multiplier;

pub use arithmetic::{
    decimal_from_f64, round_fee, ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
pub use cargo::{any_fragile, validate_cargo, CargoLineItem, MAX_DIMENSION_CM, MAX_WEIGHT_KG};
pub use distance::{DistanceFee, DistanceQuote, UNKNOWN_REGION};
pub use enums::{DistanceSource, ParseEnumError, ServiceClass};
pub use geo_point::{GeoPoint, Location};
pub use service_multiplier::ServiceMultiplierTable;
