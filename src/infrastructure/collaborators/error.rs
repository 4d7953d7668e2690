//! # Collaborator Errors
//!
//! Error types for calls to external geocoding and routing services.
//!
//! Every collaborator failure is recoverable from the estimator's point of
//! view: a failed geocode leaves a leg unresolved and a failed route falls
//! back to a great-circle distance. The classification helpers exist for
//! logging and for callers that want to retry on their own.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::infrastructure::collaborators::error::CollaboratorError;
//!
//! let error = CollaboratorError::timeout_with_duration("geocode timed out", 3000);
//! assert!(error.is_retryable());
//!
//! let error = CollaboratorError::not_found("no match for 'Atlantis'");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for collaborator (geocoder/router) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Request timed out.
    #[error("collaborator timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("collaborator connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The geocoder found no match for the query.
    #[error("no geocoding match: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// The router could not produce a path.
    #[error("route unavailable: {message}")]
    RouteUnavailable {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("collaborator rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry after duration in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// The request was rejected as malformed.
    #[error("collaborator invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Response could not be understood.
    #[error("collaborator protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Client-side failure (e.g. the HTTP client could not be built).
    #[error("collaborator internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl CollaboratorError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a route unavailable error.
    #[must_use]
    pub fn route_unavailable(message: impl Into<String>) -> Self {
        Self::RouteUnavailable {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>, retry_after_ms: Option<u64>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms,
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if the collaborator answered but had nothing to offer.
    #[must_use]
    pub fn is_no_result(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RouteUnavailable { .. })
    }

    /// Returns true if the collaborator's response was malformed.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::ProtocolError { .. })
    }

    /// Returns the retry delay in milliseconds, if known.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }
}

/// Result type for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
