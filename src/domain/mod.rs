//! # Domain Layer
//!
//! Pure types and pricing rules with no I/O.
//!
//! - [`value_objects`]: Coordinates, cargo, service classes, multipliers
//! - [`entities`]: Shipments, requests and quotes
//! - [`services`]: Great-circle distance
//! - [`errors`]: Domain error taxonomy

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
