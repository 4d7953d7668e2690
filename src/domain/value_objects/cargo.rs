//! # Cargo
//!
//! Physical description of what is being shipped.
//!
//! A shipment carries one or more [`CargoLineItem`]s. Line items are
//! validated on construction so pricing code never sees a negative weight or
//! a zero quantity.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::cargo::CargoLineItem;
//!
//! let item = CargoLineItem::new(5.0, 30.0, 20.0, 10.0, false, 2).unwrap();
//! assert_eq!(item.quantity(), 2);
//! assert!(CargoLineItem::new(-1.0, 0.0, 0.0, 0.0, false, 1).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of cargo: a number of identical parcels.
///
/// Weight is in kilograms, dimensions in centimetres. Zero dimensions are
/// allowed and mean "not measured".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCargoLineItem")]
pub struct CargoLineItem {
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    fragile: bool,
    quantity: u32,
}

#[derive(Deserialize)]
struct RawCargoLineItem {
    weight_kg: f64,
    #[serde(default)]
    length_cm: f64,
    #[serde(default)]
    width_cm: f64,
    #[serde(default)]
    height_cm: f64,
    #[serde(default)]
    fragile: bool,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl TryFrom<RawCargoLineItem> for CargoLineItem {
    type Error = DomainError;

    fn try_from(raw: RawCargoLineItem) -> Result<Self, Self::Error> {
        Self::new(
            raw.weight_kg,
            raw.length_cm,
            raw.width_cm,
            raw.height_cm,
            raw.fragile,
            raw.quantity,
        )
    }
}

/// Heaviest single parcel accepted, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 100_000.0;

/// Longest accepted side of a single parcel, in centimetres.
pub const MAX_DIMENSION_CM: f64 = 10_000.0;

fn check_measure(name: &str, value: f64, max: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::invalid_cargo(format!(
            "{} must be a finite number",
            name
        )));
    }
    if value < 0.0 {
        return Err(DomainError::invalid_cargo(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    if value > max {
        return Err(DomainError::invalid_cargo(format!(
            "{} must not exceed {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

impl CargoLineItem {
    /// Creates a validated line item.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCargoSpec` if any measure is negative,
    /// not finite or above [`MAX_WEIGHT_KG`] / [`MAX_DIMENSION_CM`], or if
    /// `quantity` is zero.
    pub fn new(
        weight_kg: f64,
        length_cm: f64,
        width_cm: f64,
        height_cm: f64,
        fragile: bool,
        quantity: u32,
    ) -> DomainResult<Self> {
        check_measure("weight_kg", weight_kg, MAX_WEIGHT_KG)?;
        check_measure("length_cm", length_cm, MAX_DIMENSION_CM)?;
        check_measure("width_cm", width_cm, MAX_DIMENSION_CM)?;
        check_measure("height_cm", height_cm, MAX_DIMENSION_CM)?;
        if quantity == 0 {
            return Err(DomainError::invalid_cargo("quantity must be at least 1"));
        }
        Ok(Self {
            weight_kg,
            length_cm,
            width_cm,
            height_cm,
            fragile,
            quantity,
        })
    }

    /// Creates an unmeasured line item (all dimensions zero).
    ///
    /// # Errors
    ///
    /// Same as [`CargoLineItem::new`].
    pub fn weighed(weight_kg: f64, fragile: bool, quantity: u32) -> DomainResult<Self> {
        Self::new(weight_kg, 0.0, 0.0, 0.0, fragile, quantity)
    }

    /// Weight of a single parcel in kilograms.
    #[inline]
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Length in centimetres.
    #[inline]
    #[must_use]
    pub const fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// Width in centimetres.
    #[inline]
    #[must_use]
    pub const fn width_cm(&self) -> f64 {
        self.width_cm
    }

    /// Height in centimetres.
    #[inline]
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Whether the parcels need careful handling.
    #[inline]
    #[must_use]
    pub const fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// Number of identical parcels.
    #[inline]
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Volume of a single parcel in cubic centimetres.
    #[inline]
    #[must_use]
    pub fn volume_cm3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm
    }
}

impl fmt::Display for CargoLineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {}kg ({}x{}x{}cm{})",
            self.quantity,
            self.weight_kg,
            self.length_cm,
            self.width_cm,
            self.height_cm,
            if self.fragile { ", fragile" } else { "" }
        )
    }
}

/// Checks a whole cargo list.
///
/// # Errors
///
/// Returns `DomainError::InvalidCargoSpec` if the list is empty.
pub fn validate_cargo(items: &[CargoLineItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::invalid_cargo("at least one cargo item is required"));
    }
    Ok(())
}

/// Returns true if any line item is fragile.
#[must_use]
pub fn any_fragile(items: &[CargoLineItem]) -> bool {
    items.iter().any(CargoLineItem::is_fragile)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn valid_item() {
            let item = CargoLineItem::new(5.0, 30.0, 20.0, 10.0, true, 3).unwrap();
            assert_eq!(item.weight_kg(), 5.0);
            assert!(item.is_fragile());
            assert_eq!(item.volume_cm3(), 6000.0);
        }

        #[test]
        fn zero_weight_allowed() {
            assert!(CargoLineItem::weighed(0.0, false, 1).is_ok());
        }

        #[test]
        fn negative_weight_rejected() {
            let err = CargoLineItem::weighed(-0.5, false, 1).unwrap_err();
            assert!(matches!(err, DomainError::InvalidCargoSpec(_)));
            assert!(err.to_string().contains("weight_kg"));
        }

        #[test]
        fn negative_dimension_rejected() {
            assert!(CargoLineItem::new(1.0, 10.0, -2.0, 5.0, false, 1).is_err());
        }

        #[test]
        fn nan_rejected() {
            assert!(CargoLineItem::weighed(f64::NAN, false, 1).is_err());
            assert!(CargoLineItem::new(1.0, f64::INFINITY, 1.0, 1.0, false, 1).is_err());
        }

        #[test]
        fn oversized_measures_rejected() {
            let err = CargoLineItem::weighed(1e30, false, 1).unwrap_err();
            assert!(matches!(err, DomainError::InvalidCargoSpec(_)));
            assert!(err.to_string().contains("must not exceed"));
            assert!(CargoLineItem::new(1.0, 1.0, MAX_DIMENSION_CM + 1.0, 1.0, false, 1).is_err());
            assert!(CargoLineItem::weighed(MAX_WEIGHT_KG, false, u32::MAX).is_ok());
        }

        #[test]
        fn zero_quantity_rejected() {
            let err = CargoLineItem::weighed(1.0, false, 0).unwrap_err();
            assert!(err.to_string().contains("quantity"));
        }
    }

    mod serde_support {
        use super::*;

        #[test]
        fn defaults_for_missing_fields() {
            let item: CargoLineItem = serde_json::from_str(r#"{"weight_kg":2.5}"#).unwrap();
            assert_eq!(item.quantity(), 1);
            assert_eq!(item.volume_cm3(), 0.0);
            assert!(!item.is_fragile());
        }

        #[test]
        fn invalid_rejected() {
            let res = serde_json::from_str::<CargoLineItem>(r#"{"weight_kg":1,"quantity":0}"#);
            assert!(res.is_err());
        }
    }

    mod list {
        use super::*;

        #[test]
        fn empty_list_rejected() {
            assert!(validate_cargo(&[]).is_err());
        }

        #[test]
        fn fragile_detection() {
            let plain = CargoLineItem::weighed(1.0, false, 1).unwrap();
            let glass = CargoLineItem::weighed(1.0, true, 1).unwrap();
            assert!(!any_fragile(&[plain]));
            assert!(any_fragile(&[plain, glass]));
        }
    }
}
