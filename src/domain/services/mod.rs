//! # Domain Services
//!
//! Pure functions that don't naturally belong to a single value object.
//!
//! ## Services
//!
//! - [`great_circle::great_circle_km`]: Haversine distance between two points
//! - [`great_circle::path_length_km`]: Length of a routed polyline

pub mod great_circle;

pub use great_circle::{great_circle_km, path_length_km, EARTH_RADIUS_KM};
