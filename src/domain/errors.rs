//! # Domain Errors
//!
//! Error types raised by domain value objects and pure pricing logic.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Cargo line items are malformed (negative weight, zero quantity, ...).
    #[error("invalid cargo spec: {0}")]
    InvalidCargoSpec(String),

    /// Latitude/longitude out of range or not finite.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A pricing table is malformed.
    #[error("invalid pricing table: {0}")]
    InvalidPricingTable(String),

    /// Fee arithmetic failed.
    #[error("fee arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid cargo spec error.
    #[must_use]
    pub fn invalid_cargo(message: impl Into<String>) -> Self {
        Self::InvalidCargoSpec(message.into())
    }

    /// Creates an invalid coordinate error.
    #[must_use]
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::InvalidCoordinate(message.into())
    }

    /// Creates an invalid pricing table error.
    #[must_use]
    pub fn invalid_pricing_table(message: impl Into<String>) -> Self {
        Self::InvalidPricingTable(message.into())
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCargoSpec(_) | Self::InvalidCoordinate(_)
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
