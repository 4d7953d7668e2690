//! # Logging
//!
//! Structured logging setup on `tracing-subscriber`.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `text` (`pretty` is an alias)
//! - `RUST_LOG`: Log level filter (default: `info`)
//!
//! # Example
//!
//! ```no_run
//! use parcel_quote::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines (production).
    #[default]
    Json,
    /// Human-readable text (development).
    Text,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to JSON.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Self::Text,
            _ => Self::Json,
        })
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Reads `LOG_FORMAT` and `RUST_LOG`.
    #[must_use]
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        Self { format, level }
    }

    /// Overrides the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialised");
    }
}
