//! # Service Multipliers
//!
//! Per-service-class price multipliers applied to the base cargo fee.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::enums::ServiceClass;
//! use parcel_quote::domain::value_objects::service_multiplier::ServiceMultiplierTable;
//! use rust_decimal::Decimal;
//!
//! let table = ServiceMultiplierTable::default();
//! assert_eq!(table.multiplier_for(ServiceClass::Express), Decimal::new(15, 1));
//! assert_eq!(table.multiplier_for_key("overnight"), Decimal::ONE);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::ServiceClass;
use rust_decimal::Decimal;
use std::fmt;

/// Ordered mapping from service class to multiplier.
///
/// # Invariants
///
/// - Exactly one entry per [`ServiceClass`], in [`ServiceClass::ALL`] order
/// - `Standard` is exactly 1.0
/// - Every multiplier is strictly positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMultiplierTable {
    entries: Vec<(ServiceClass, Decimal)>,
}

impl ServiceMultiplierTable {
    /// Default multiplier for a class.
    #[must_use]
    pub fn default_multiplier(class: ServiceClass) -> Decimal {
        match class {
            ServiceClass::SecondClass => Decimal::new(8, 1),
            ServiceClass::Standard => Decimal::ONE,
            ServiceClass::FirstClass => Decimal::new(12, 1),
            ServiceClass::Express => Decimal::new(15, 1),
            ServiceClass::Priority => Decimal::TWO,
        }
    }

    /// Builds a table from the defaults with the given overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingTable` if `Standard` is overridden
    /// with anything other than 1.0 or a multiplier is not positive.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (ServiceClass, Decimal)>,
    ) -> DomainResult<Self> {
        let mut table = Self::default();
        for (class, multiplier) in overrides {
            if multiplier <= Decimal::ZERO {
                return Err(DomainError::invalid_pricing_table(format!(
                    "multiplier for {} must be positive, got {}",
                    class, multiplier
                )));
            }
            if class.is_baseline() && multiplier != Decimal::ONE {
                return Err(DomainError::invalid_pricing_table(format!(
                    "{} is the baseline and must stay 1.0, got {}",
                    class, multiplier
                )));
            }
            if let Some(entry) = table.entries.iter_mut().find(|(c, _)| *c == class) {
                entry.1 = multiplier;
            }
        }
        Ok(table)
    }

    /// Returns the multiplier for a class.
    #[must_use]
    pub fn multiplier_for(&self, class: ServiceClass) -> Decimal {
        self.entries
            .iter()
            .find(|(c, _)| *c == class)
            .map_or(Decimal::ONE, |(_, m)| *m)
    }

    /// Looks up a multiplier by wire name; unrecognized names get 1.0.
    #[must_use]
    pub fn multiplier_for_key(&self, key: &str) -> Decimal {
        key.parse::<ServiceClass>()
            .map_or(Decimal::ONE, |class| self.multiplier_for(class))
    }

    /// Iterates entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ServiceClass, Decimal)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the table covers every class.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceMultiplierTable {
    fn default() -> Self {
        Self {
            entries: ServiceClass::ALL
                .iter()
                .map(|class| (*class, Self::default_multiplier(*class)))
                .collect(),
        }
    }
}

impl fmt::Display for ServiceMultiplierTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(class, m)| format!("{}={}", class, m))
            .collect();
        write!(f, "ServiceMultiplierTable({})", parts.join(", "))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_in_class_order() {
        let table = ServiceMultiplierTable::default();
        let got: Vec<_> = table.iter().collect();
        assert_eq!(
            got,
            vec![
                (ServiceClass::SecondClass, Decimal::new(8, 1)),
                (ServiceClass::Standard, Decimal::ONE),
                (ServiceClass::FirstClass, Decimal::new(12, 1)),
                (ServiceClass::Express, Decimal::new(15, 1)),
                (ServiceClass::Priority, Decimal::TWO),
            ]
        );
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn override_applies() {
        let table =
            ServiceMultiplierTable::with_overrides([(ServiceClass::Express, Decimal::new(175, 2))])
                .unwrap();
        assert_eq!(table.multiplier_for(ServiceClass::Express), Decimal::new(175, 2));
        assert_eq!(table.multiplier_for(ServiceClass::Priority), Decimal::TWO);
    }

    #[test]
    fn standard_must_stay_one() {
        assert!(ServiceMultiplierTable::with_overrides([(ServiceClass::Standard, Decimal::ONE)])
            .is_ok());
        let err =
            ServiceMultiplierTable::with_overrides([(ServiceClass::Standard, Decimal::new(11, 1))])
                .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPricingTable(_)));
    }

    #[test]
    fn non_positive_rejected() {
        assert!(
            ServiceMultiplierTable::with_overrides([(ServiceClass::Express, Decimal::ZERO)])
                .is_err()
        );
    }

    #[test]
    fn key_lookup() {
        let table = ServiceMultiplierTable::default();
        assert_eq!(table.multiplier_for_key("PRIORITY"), Decimal::TWO);
        assert_eq!(table.multiplier_for_key("second-class"), Decimal::new(8, 1));
        assert_eq!(table.multiplier_for_key("NEXT_WEEK"), Decimal::ONE);
        assert_eq!(table.multiplier_for_key(""), Decimal::ONE);
    }

    #[test]
    fn display_lists_entries() {
        let display = ServiceMultiplierTable::default().to_string();
        assert!(display.contains("EXPRESS=1.5"));
    }
}
