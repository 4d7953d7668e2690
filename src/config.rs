//! # Configuration
//!
//! Layered settings for the estimator, its collaborators and the server.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `parcel-quote.{toml,json,yaml}` in the working directory (optional),
//!    or an explicit file
//! 3. Environment variables prefixed `PARCEL_QUOTE__`, nested with `__`
//!    (e.g. `PARCEL_QUOTE__GEOCODER__BASE_URL`)
//!
//! # Example file
//!
//! ```toml
//! [geocoder]
//! base_url = "https://nominatim.openstreetmap.org"
//!
//! [estimation]
//! country_qualifier = "Vietnam"
//!
//! [service_multipliers]
//! EXPRESS = 1.6
//! ```

use crate::application::services::{EstimatorOptions, FeeEstimator};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{decimal_from_f64, ServiceClass, ServiceMultiplierTable};
use crate::infrastructure::collaborators::{
    CollaboratorError, NominatimConfig, NominatimGeocoder, OsrmConfig, OsrmRouter,
};
use crate::infrastructure::pricing::{
    DistanceTier, TieredDistanceFeeClassifier, WeightBand, WeightBandCargoFeeEvaluator,
};
use config::{Config, Environment, File};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PARCEL_QUOTE";

/// Default config file stem.
pub const DEFAULT_CONFIG_NAME: &str = "parcel-quote";

/// Error loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A pricing table is malformed.
    #[error("invalid pricing table: {0}")]
    Table(#[from] DomainError),

    /// An adapter could not be built.
    #[error("failed to build collaborator: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, ConfigError> {
    decimal_from_f64(value).map_err(|e| ConfigError::invalid(format!("{}: {}", field, e)))
}

/// Geocoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    /// Base URL of the Nominatim-compatible service.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            timeout_ms: 3000,
            user_agent: concat!("parcel-quote/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Base URL of the OSRM-compatible service.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Routing profile.
    pub profile: String,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            timeout_ms: 5000,
            profile: "driving".to_string(),
        }
    }
}

/// Estimation pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationSettings {
    /// Country appended to address text before geocoding.
    pub country_qualifier: Option<String>,
    /// Deadline for a whole estimate call in milliseconds.
    pub estimate_timeout_ms: u64,
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self {
            country_qualifier: None,
            estimate_timeout_ms: 10000,
        }
    }
}

/// One distance tier as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTierSettings {
    /// Inclusive upper bound in km; omit for the last tier.
    #[serde(default)]
    pub up_to_km: Option<f64>,
    /// Surcharge.
    pub surcharge: f64,
    /// Region label.
    pub region: String,
}

/// One weight band as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBandSettings {
    /// Inclusive cap in kg.
    pub up_to_kg: f64,
    /// Fee.
    pub fee: f64,
}

/// Cargo fee table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoFeeSettings {
    /// Weight bands in increasing order.
    pub bands: Vec<WeightBandSettings>,
    /// Fee per started kg above the last band.
    pub per_extra_kg: f64,
    /// Divisor turning cm³ into volumetric kg.
    pub volumetric_divisor: f64,
    /// Fraction of the fee added for fragile cargo.
    pub fragile_surcharge_rate: f64,
}

impl Default for CargoFeeSettings {
    fn default() -> Self {
        Self {
            bands: vec![
                WeightBandSettings {
                    up_to_kg: 1.0,
                    fee: 15000.0,
                },
                WeightBandSettings {
                    up_to_kg: 5.0,
                    fee: 20000.0,
                },
                WeightBandSettings {
                    up_to_kg: 10.0,
                    fee: 30000.0,
                },
            ],
            per_extra_kg: 5000.0,
            volumetric_divisor: 6000.0,
            fragile_surcharge_rate: 0.2,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Geocoder settings.
    pub geocoder: GeocoderSettings,
    /// Router settings.
    pub router: RouterSettings,
    /// Pipeline settings.
    pub estimation: EstimationSettings,
    /// Multiplier overrides keyed by service class name.
    pub service_multipliers: BTreeMap<String, f64>,
    /// Distance tiers in order.
    pub distance_tiers: Vec<DistanceTierSettings>,
    /// Cargo fee table.
    pub cargo_fees: CargoFeeSettings,
    /// Server settings.
    pub server: ServerSettings,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        let distance_tiers = TieredDistanceFeeClassifier::default()
            .tiers()
            .iter()
            .map(|tier| DistanceTierSettings {
                up_to_km: tier.up_to_km,
                surcharge: tier.surcharge.to_f64().unwrap_or_default(),
                region: tier.region.clone(),
            })
            .collect();
        Self {
            geocoder: GeocoderSettings::default(),
            router: RouterSettings::default(),
            estimation: EstimationSettings::default(),
            service_multipliers: BTreeMap::new(),
            distance_tiers,
            cargo_fees: CargoFeeSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl EstimatorConfig {
    /// Loads configuration from the default file (if present) and the
    /// environment, or from `path` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is unreadable or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        Self::from_builder(builder)
    }

    /// Deserializes and validates a prepared builder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is unreadable or a value is invalid.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks timeouts and builds every table once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geocoder.timeout_ms == 0 {
            return Err(ConfigError::invalid("geocoder.timeout_ms must be positive"));
        }
        if self.router.timeout_ms == 0 {
            return Err(ConfigError::invalid("router.timeout_ms must be positive"));
        }
        if self.estimation.estimate_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "estimation.estimate_timeout_ms must be positive",
            ));
        }
        self.multiplier_table()?;
        self.distance_classifier()?;
        self.cargo_fee_evaluator()?;
        Ok(())
    }

    /// Builds the service multiplier table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown class names or invalid multipliers.
    pub fn multiplier_table(&self) -> Result<ServiceMultiplierTable, ConfigError> {
        let overrides = self
            .service_multipliers
            .iter()
            .map(|(key, value)| {
                let class = key
                    .parse::<ServiceClass>()
                    .map_err(|e| ConfigError::invalid(format!("service_multipliers: {}", e)))?;
                Ok((class, to_decimal(key, *value)?))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(ServiceMultiplierTable::with_overrides(overrides)?)
    }

    /// Builds the distance classifier.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the tier table is invalid.
    pub fn distance_classifier(&self) -> Result<TieredDistanceFeeClassifier, ConfigError> {
        let tiers = self
            .distance_tiers
            .iter()
            .map(|tier| {
                Ok(DistanceTier {
                    up_to_km: tier.up_to_km,
                    surcharge: to_decimal(&tier.region, tier.surcharge)?,
                    region: tier.region.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(TieredDistanceFeeClassifier::new(tiers)?)
    }

    /// Builds the cargo fee evaluator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the band table is invalid.
    pub fn cargo_fee_evaluator(&self) -> Result<WeightBandCargoFeeEvaluator, ConfigError> {
        let fees = &self.cargo_fees;
        let bands = fees
            .bands
            .iter()
            .map(|band| Ok(WeightBand::new(band.up_to_kg, to_decimal("cargo_fees.bands", band.fee)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(WeightBandCargoFeeEvaluator::new(
            bands,
            to_decimal("cargo_fees.per_extra_kg", fees.per_extra_kg)?,
            fees.volumetric_divisor,
            to_decimal("cargo_fees.fragile_surcharge_rate", fees.fragile_surcharge_rate)?,
        )?)
    }

    /// Estimator timeouts and geocoding options.
    #[must_use]
    pub fn estimator_options(&self) -> EstimatorOptions {
        EstimatorOptions {
            country_qualifier: self.estimation.country_qualifier.clone(),
            geocode_timeout_ms: self.geocoder.timeout_ms,
            route_timeout_ms: self.router.timeout_ms,
            estimate_timeout_ms: self.estimation.estimate_timeout_ms,
        }
    }

    /// Wires a [`FeeEstimator`] with the Nominatim and OSRM adapters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a table is invalid or an adapter cannot be
    /// built.
    pub fn build_estimator(&self) -> Result<FeeEstimator, ConfigError> {
        let geocoder = NominatimGeocoder::new(
            &NominatimConfig::new(&self.geocoder.base_url)
                .with_timeout_ms(self.geocoder.timeout_ms)
                .with_user_agent(&self.geocoder.user_agent),
        )?;
        let router = OsrmRouter::new(
            &OsrmConfig::new(&self.router.base_url)
                .with_profile(&self.router.profile)
                .with_timeout_ms(self.router.timeout_ms)
                .with_user_agent(&self.geocoder.user_agent),
        )?;

        Ok(FeeEstimator::new(
            Arc::new(geocoder),
            Arc::new(router),
            Arc::new(self.distance_classifier()?),
            Arc::new(self.cargo_fee_evaluator()?),
            self.multiplier_table()?,
            self.estimator_options(),
        ))
    }
}
