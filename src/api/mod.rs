//! # API Layer
//!
//! Outer surfaces over the estimator.
//!
//! - [`rest`]: axum HTTP endpoints

pub mod rest;
