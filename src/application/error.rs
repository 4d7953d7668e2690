//! # Application Errors
//!
//! Error types for the estimation pipeline.
//!
//! # Error Hierarchy
//!
//! ```text
//! EstimationError                 - fatal to one estimate call
//! ├── Domain(DomainError)         - invalid cargo, arithmetic overflow
//! └── Timeout { timeout_ms }      - whole-call deadline elapsed
//!
//! GeocodeFailure                  - recoverable, leg stays unresolved
//! ├── BlankAddress
//! ├── Timeout { timeout_ms }
//! └── Collaborator(CollaboratorError)
//! ```
//!
//! # Examples
//!
//! ```
//! use parcel_quote::application::error::EstimationError;
//! use parcel_quote::domain::errors::DomainError;
//!
//! let err: EstimationError = DomainError::invalid_cargo("quantity must be at least 1").into();
//! assert!(err.is_client_error());
//!
//! let err = EstimationError::timeout(2000);
//! assert!(err.is_timeout());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::collaborators::error::CollaboratorError;
use thiserror::Error;

/// A fatal error for one estimate call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// Domain rule violation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The estimate did not finish within its deadline.
    #[error("estimate timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline in milliseconds.
        timeout_ms: u64,
    },
}

impl EstimationError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_client_error(),
            Self::Timeout { .. } => false,
        }
    }

    /// Returns true if the deadline elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Short machine-readable code for outer surfaces.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidCargoSpec(_)) => "INVALID_CARGO",
            Self::Domain(DomainError::InvalidCoordinate(_)) => "INVALID_COORDINATE",
            Self::Domain(DomainError::InvalidPricingTable(_)) => "INVALID_PRICING_TABLE",
            Self::Domain(DomainError::Arithmetic(_)) => "ARITHMETIC_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
        }
    }
}

/// Result type for estimation operations.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// An address could not be turned into a coordinate.
///
/// Always recoverable: the leg is treated as unresolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeFailure {
    /// Address text was empty.
    #[error("address is blank")]
    BlankAddress,

    /// The geocoder did not answer in time.
    #[error("geocoding timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The geocoder failed or found nothing.
    #[error("geocoding failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl GeocodeFailure {
    /// Returns true if the geocoder answered but had no match.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Collaborator(CollaboratorError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ArithmeticError;

    #[test]
    fn invalid_cargo_is_client_error() {
        let err: EstimationError = DomainError::invalid_cargo("empty").into();
        assert!(err.is_client_error());
        assert!(!err.is_timeout());
        assert_eq!(err.code(), "INVALID_CARGO");
    }

    #[test]
    fn arithmetic_is_server_side() {
        let err: EstimationError = DomainError::from(ArithmeticError::Overflow).into();
        assert!(!err.is_client_error());
        assert_eq!(err.code(), "ARITHMETIC_ERROR");
    }

    #[test]
    fn timeout_display() {
        let err = EstimationError::timeout(1500);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "estimate timed out after 1500ms");
        assert_eq!(err.code(), "TIMEOUT");
    }

    #[test]
    fn geocode_not_found() {
        let failure: GeocodeFailure = CollaboratorError::not_found("none").into();
        assert!(failure.is_not_found());
        assert!(!GeocodeFailure::BlankAddress.is_not_found());
        assert!(failure.to_string().contains("geocoding failed"));
    }
}
