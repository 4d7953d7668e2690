//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! This module provides the closed enumerations used throughout the estimator:
//!
//! - [`ServiceClass`] - Shipping speed/priority tier priced by a multiplier
//! - [`DistanceSource`] - How the distance of a quote was obtained
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipping service class.
///
/// Each class maps to exactly one multiplier in the
/// [`ServiceMultiplierTable`](super::service_multiplier::ServiceMultiplierTable).
/// [`ServiceClass::Standard`] is the pricing baseline.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::enums::ServiceClass;
///
/// let express: ServiceClass = "express".parse().unwrap();
/// assert_eq!(express, ServiceClass::Express);
/// assert_eq!(express.to_string(), "EXPRESS");
/// assert!(ServiceClass::Standard.is_baseline());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ServiceClass {
    /// Cheapest, slowest delivery.
    SecondClass = 0,
    /// Baseline service (multiplier 1.0).
    #[default]
    Standard = 1,
    /// Faster than standard.
    FirstClass = 2,
    /// Next-day style delivery.
    Express = 3,
    /// Same-day, highest priority handling.
    Priority = 4,
}

impl ServiceClass {
    /// Every service class, in comparison-table display order.
    pub const ALL: [ServiceClass; 5] = [
        Self::SecondClass,
        Self::Standard,
        Self::FirstClass,
        Self::Express,
        Self::Priority,
    ];

    /// Returns the wire name (`SCREAMING_SNAKE_CASE`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecondClass => "SECOND_CLASS",
            Self::Standard => "STANDARD",
            Self::FirstClass => "FIRST_CLASS",
            Self::Express => "EXPRESS",
            Self::Priority => "PRIORITY",
        }
    }

    /// Returns true if this is the pricing baseline.
    #[inline]
    #[must_use]
    pub const fn is_baseline(self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "SECOND_CLASS" | "SECONDCLASS" => Ok(Self::SecondClass),
            "STANDARD" => Ok(Self::Standard),
            "FIRST_CLASS" | "FIRSTCLASS" => Ok(Self::FirstClass),
            "EXPRESS" => Ok(Self::Express),
            "PRIORITY" => Ok(Self::Priority),
            _ => Err(ParseEnumError::InvalidValue("ServiceClass", s.to_string())),
        }
    }
}

/// Origin of the distance used in a quote.
///
/// Sources degrade in order: routed path → straight great-circle line →
/// unavailable (a leg had no coordinate).
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::enums::DistanceSource;
///
/// assert!(DistanceSource::Route.is_precise());
/// assert!(DistanceSource::GreatCircle.is_known());
/// assert!(!DistanceSource::Unavailable.is_known());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DistanceSource {
    /// Summed over the waypoints returned by the routing service.
    Route = 0,
    /// Straight great-circle line between the two legs (routing failed).
    GreatCircle = 1,
    /// At least one leg had no coordinate; distance is zero.
    Unavailable = 2,
}

impl DistanceSource {
    /// Returns true if the distance came from a routed path.
    #[inline]
    #[must_use]
    pub const fn is_precise(self) -> bool {
        matches!(self, Self::Route)
    }

    /// Returns true if any distance was computed.
    #[inline]
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for DistanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route => write!(f, "ROUTE"),
            Self::GreatCircle => write!(f, "GREAT_CIRCLE"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

impl FromStr for DistanceSource {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "ROUTE" => Ok(Self::Route),
            "GREAT_CIRCLE" | "GREATCIRCLE" => Ok(Self::GreatCircle),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(ParseEnumError::InvalidValue("DistanceSource", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod service_class {
        use super::*;

        #[test]
        fn all_in_display_order() {
            assert_eq!(
                ServiceClass::ALL,
                [
                    ServiceClass::SecondClass,
                    ServiceClass::Standard,
                    ServiceClass::FirstClass,
                    ServiceClass::Express,
                    ServiceClass::Priority,
                ]
            );
        }

        #[test]
        fn default_is_standard() {
            assert_eq!(ServiceClass::default(), ServiceClass::Standard);
            assert!(ServiceClass::default().is_baseline());
            assert!(!ServiceClass::Express.is_baseline());
        }

        #[test]
        fn display_screaming_snake() {
            assert_eq!(ServiceClass::SecondClass.to_string(), "SECOND_CLASS");
            assert_eq!(ServiceClass::FirstClass.to_string(), "FIRST_CLASS");
            assert_eq!(ServiceClass::Priority.to_string(), "PRIORITY");
        }

        #[test]
        fn from_str_accepts_variants() {
            assert_eq!(
                "second_class".parse::<ServiceClass>().unwrap(),
                ServiceClass::SecondClass
            );
            assert_eq!(
                "first-class".parse::<ServiceClass>().unwrap(),
                ServiceClass::FirstClass
            );
            assert_eq!(
                " Express ".parse::<ServiceClass>().unwrap(),
                ServiceClass::Express
            );
        }

        #[test]
        fn from_str_invalid() {
            let err = "OVERNIGHT".parse::<ServiceClass>().unwrap_err();
            assert_eq!(
                err,
                ParseEnumError::InvalidValue("ServiceClass", "OVERNIGHT".to_string())
            );
        }

        #[test]
        fn serde_roundtrip() {
            let json = serde_json::to_string(&ServiceClass::FirstClass).unwrap();
            assert_eq!(json, "\"FIRST_CLASS\"");
            let back: ServiceClass = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ServiceClass::FirstClass);
        }
    }

    mod distance_source {
        use super::*;

        #[test]
        fn predicates() {
            assert!(DistanceSource::Route.is_precise());
            assert!(!DistanceSource::GreatCircle.is_precise());
            assert!(DistanceSource::GreatCircle.is_known());
            assert!(!DistanceSource::Unavailable.is_known());
        }

        #[test]
        fn display_and_parse() {
            assert_eq!(DistanceSource::GreatCircle.to_string(), "GREAT_CIRCLE");
            assert_eq!(
                "great-circle".parse::<DistanceSource>().unwrap(),
                DistanceSource::GreatCircle
            );
            assert!("teleport".parse::<DistanceSource>().is_err());
        }
    }

    mod parse_enum_error {
        use super::*;

        #[test]
        fn display_format() {
            let err = ParseEnumError::InvalidValue("ServiceClass", "NEXT_WEEK".to_string());
            assert_eq!(err.to_string(), "invalid ServiceClass value: 'NEXT_WEEK'");
        }
    }
}
