//! # Parcel Quote
//!
//! Shipping-fee estimation for parcel delivery.
//!
//! A shipment (pickup, delivery, cargo lines) is priced in stages:
//!
//! 1. Cargo lines are validated and turned into a base fee
//! 2. Address-only legs are geocoded
//! 3. The routed distance is measured, falling back to great-circle
//! 4. A distance tier adds a regional surcharge
//! 5. Each service class applies its multiplier:
//!    `total = round(base_fee * multiplier + distance_fee)`
//!
//! Collaborator failures never fail an estimate; they only degrade the
//! distance component.
//!
//! # Layout
//!
//! - [`domain`]: value objects, entities and pure geometry
//! - [`application`]: the estimation pipeline
//! - [`infrastructure`]: HTTP collaborators and pricing tables
//! - [`api`]: REST surface
//! - [`config`]: layered configuration
//! - [`logging`]: structured logging setup

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
