//! # Infrastructure Layer
//!
//! Adapters for external services and the pricing tables.
//!
//! - [`collaborators`]: Geocoding/routing ports and their HTTP adapters
//! - [`pricing`]: Distance tier and cargo weight band tables

pub mod collaborators;
pub mod pricing;
