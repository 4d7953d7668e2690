//! # Cargo Fees
//!
//! Weight-band [`CargoFeeEvaluator`].
//!
//! Each line item is charged on the greater of its actual weight and its
//! volumetric weight (`L x W x H / divisor`), times its quantity. The total
//! chargeable weight is priced by the first band whose cap covers it; beyond
//! the last band every started kilogram costs `per_extra_kg`. Fragile cargo
//! adds a percentage of that fee.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::CargoLineItem;
//! use parcel_quote::infrastructure::collaborators::CargoFeeEvaluator;
//! use parcel_quote::infrastructure::pricing::WeightBandCargoFeeEvaluator;
//! use rust_decimal::Decimal;
//!
//! let evaluator = WeightBandCargoFeeEvaluator::default();
//! let items = [CargoLineItem::weighed(5.0, false, 1).unwrap()];
//! assert_eq!(evaluator.base_fee(&items, false).unwrap(), Decimal::new(20000, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    decimal_from_f64, round_fee, ArithmeticResult, CargoLineItem, CheckedArithmetic,
};
use crate::infrastructure::collaborators::traits::CargoFeeEvaluator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One weight band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBand {
    /// Inclusive cap in kilograms.
    pub up_to_kg: f64,
    /// Fee for weights in this band.
    pub fee: Decimal,
}

impl WeightBand {
    /// Creates a band.
    #[must_use]
    pub fn new(up_to_kg: f64, fee: Decimal) -> Self {
        Self { up_to_kg, fee }
    }
}

/// Cargo fee evaluator backed by weight bands.
///
/// # Invariants
///
/// - At least one band, caps finite, positive and strictly increasing
/// - Fees, `per_extra_kg` and `fragile_surcharge_rate` are non-negative
/// - `volumetric_divisor` is finite and positive
#[derive(Debug, Clone, PartialEq)]
pub struct WeightBandCargoFeeEvaluator {
    bands: Vec<WeightBand>,
    per_extra_kg: Decimal,
    volumetric_divisor: f64,
    fragile_surcharge_rate: Decimal,
}

impl WeightBandCargoFeeEvaluator {
    /// Creates a validated evaluator.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingTable` if any invariant is broken.
    pub fn new(
        bands: Vec<WeightBand>,
        per_extra_kg: Decimal,
        volumetric_divisor: f64,
        fragile_surcharge_rate: Decimal,
    ) -> DomainResult<Self> {
        if bands.is_empty() {
            return Err(DomainError::invalid_pricing_table("weight band table is empty"));
        }
        let mut previous = 0.0_f64;
        for band in &bands {
            if !band.up_to_kg.is_finite() || band.up_to_kg <= previous {
                return Err(DomainError::invalid_pricing_table(format!(
                    "weight band caps must be positive and increasing, got {}",
                    band.up_to_kg
                )));
            }
            if band.fee < Decimal::ZERO {
                return Err(DomainError::invalid_pricing_table(
                    "weight band fee must not be negative",
                ));
            }
            previous = band.up_to_kg;
        }
        if per_extra_kg < Decimal::ZERO {
            return Err(DomainError::invalid_pricing_table(
                "per-extra-kg fee must not be negative",
            ));
        }
        if !volumetric_divisor.is_finite() || volumetric_divisor <= 0.0 {
            return Err(DomainError::invalid_pricing_table(
                "volumetric divisor must be positive",
            ));
        }
        if fragile_surcharge_rate < Decimal::ZERO {
            return Err(DomainError::invalid_pricing_table(
                "fragile surcharge rate must not be negative",
            ));
        }
        Ok(Self {
            bands,
            per_extra_kg,
            volumetric_divisor,
            fragile_surcharge_rate,
        })
    }

    /// Chargeable weight of the whole cargo in kilograms.
    #[must_use]
    pub fn chargeable_weight_kg(&self, items: &[CargoLineItem]) -> f64 {
        items
            .iter()
            .map(|item| {
                let volumetric = item.volume_cm3() / self.volumetric_divisor;
                item.weight_kg().max(volumetric) * f64::from(item.quantity())
            })
            .sum()
    }

    fn weight_fee(&self, chargeable_kg: f64) -> ArithmeticResult<Decimal> {
        if let Some(band) = self.bands.iter().find(|b| chargeable_kg <= b.up_to_kg) {
            return Ok(band.fee);
        }
        let Some(last) = self.bands.last() else {
            return Ok(Decimal::ZERO);
        };
        decimal_from_f64((chargeable_kg - last.up_to_kg).ceil())?
            .safe_mul(self.per_extra_kg)?
            .safe_add(last.fee)
    }
}

impl Default for WeightBandCargoFeeEvaluator {
    fn default() -> Self {
        Self {
            bands: vec![
                WeightBand::new(1.0, Decimal::new(15000, 0)),
                WeightBand::new(5.0, Decimal::new(20000, 0)),
                WeightBand::new(10.0, Decimal::new(30000, 0)),
            ],
            per_extra_kg: Decimal::new(5000, 0),
            volumetric_divisor: 6000.0,
            fragile_surcharge_rate: Decimal::new(2, 1),
        }
    }
}

impl CargoFeeEvaluator for WeightBandCargoFeeEvaluator {
    fn base_fee(&self, items: &[CargoLineItem], fragile: bool) -> DomainResult<Decimal> {
        let fee = self.weight_fee(self.chargeable_weight_kg(items))?;
        if !fragile {
            return Ok(fee);
        }
        let surcharge = round_fee(fee.safe_mul(self.fragile_surcharge_rate)?);
        Ok(fee.safe_add(surcharge)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fee(items: &[CargoLineItem], fragile: bool) -> Decimal {
        WeightBandCargoFeeEvaluator::default()
            .base_fee(items, fragile)
            .unwrap()
    }

    fn weighed(kg: f64, qty: u32) -> CargoLineItem {
        CargoLineItem::weighed(kg, false, qty).unwrap()
    }

    mod bands {
        use super::*;

        #[test]
        fn light_parcel() {
            assert_eq!(fee(&[weighed(0.4, 1)], false), Decimal::new(15000, 0));
        }

        #[test]
        fn band_caps_are_inclusive() {
            assert_eq!(fee(&[weighed(1.0, 1)], false), Decimal::new(15000, 0));
            assert_eq!(fee(&[weighed(5.0, 1)], false), Decimal::new(20000, 0));
            assert_eq!(fee(&[weighed(10.0, 1)], false), Decimal::new(30000, 0));
        }

        #[test]
        fn every_started_kg_above_last_band() {
            // 12.2kg => 3 extra kg
            assert_eq!(fee(&[weighed(12.2, 1)], false), Decimal::new(45000, 0));
        }

        #[test]
        fn quantity_multiplies_weight() {
            // 2 x 3kg = 6kg
            assert_eq!(fee(&[weighed(3.0, 2)], false), Decimal::new(30000, 0));
        }

        #[test]
        fn items_are_summed() {
            assert_eq!(
                fee(&[weighed(0.5, 1), weighed(0.4, 1)], false),
                Decimal::new(15000, 0)
            );
        }
    }

    mod volumetric {
        use super::*;

        #[test]
        fn bulky_light_parcel_priced_by_volume() {
            // 60x50x40 / 6000 = 20kg volumetric
            let item = CargoLineItem::new(2.0, 60.0, 50.0, 40.0, false, 1).unwrap();
            let evaluator = WeightBandCargoFeeEvaluator::default();
            assert_eq!(evaluator.chargeable_weight_kg(&[item]), 20.0);
            assert_eq!(evaluator.base_fee(&[item], false).unwrap(), Decimal::new(80000, 0));
        }

        #[test]
        fn dense_parcel_priced_by_weight() {
            let item = CargoLineItem::new(4.0, 10.0, 10.0, 10.0, false, 1).unwrap();
            assert_eq!(fee(&[item], false), Decimal::new(20000, 0));
        }
    }

    mod fragile {
        use super::*;

        #[test]
        fn adds_twenty_percent() {
            assert_eq!(fee(&[weighed(5.0, 1)], true), Decimal::new(24000, 0));
        }

        #[test]
        fn surcharge_is_rounded() {
            let evaluator = WeightBandCargoFeeEvaluator::new(
                vec![WeightBand::new(1.0, Decimal::new(10001, 0))],
                Decimal::ZERO,
                6000.0,
                Decimal::new(5, 2),
            )
            .unwrap();
            // 10001 * 0.05 = 500.05 -> 500
            assert_eq!(
                evaluator.base_fee(&[weighed(1.0, 1)], true).unwrap(),
                Decimal::new(10501, 0)
            );
        }
    }

    mod overflow {
        use super::*;
        use crate::domain::value_objects::ArithmeticError;

        fn steep() -> WeightBandCargoFeeEvaluator {
            WeightBandCargoFeeEvaluator::new(
                vec![WeightBand::new(1.0, Decimal::ONE)],
                Decimal::MAX,
                6000.0,
                Decimal::ZERO,
            )
            .unwrap()
        }

        #[test]
        fn extra_kg_overflow_is_an_error() {
            let err = steep().base_fee(&[weighed(3.0, 1)], false).unwrap_err();
            assert_eq!(err, DomainError::Arithmetic(ArithmeticError::Overflow));
        }

        #[test]
        fn fragile_surcharge_overflow_is_an_error() {
            let evaluator = WeightBandCargoFeeEvaluator::new(
                vec![WeightBand::new(1.0, Decimal::MAX)],
                Decimal::ZERO,
                6000.0,
                Decimal::TWO,
            )
            .unwrap();
            assert!(evaluator.base_fee(&[weighed(1.0, 1)], true).is_err());
            assert_eq!(
                evaluator.base_fee(&[weighed(1.0, 1)], false).unwrap(),
                Decimal::MAX
            );
        }

        #[test]
        fn heaviest_accepted_cargo_is_priced() {
            let item = CargoLineItem::new(
                crate::domain::value_objects::MAX_WEIGHT_KG,
                10_000.0,
                10_000.0,
                10_000.0,
                true,
                u32::MAX,
            )
            .unwrap();
            assert!(fee(&[item], true) > Decimal::ZERO);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn empty_bands_rejected() {
            assert!(WeightBandCargoFeeEvaluator::new(vec![], Decimal::ONE, 6000.0, Decimal::ZERO)
                .is_err());
        }

        #[test]
        fn decreasing_caps_rejected() {
            assert!(WeightBandCargoFeeEvaluator::new(
                vec![
                    WeightBand::new(5.0, Decimal::ONE),
                    WeightBand::new(2.0, Decimal::TWO)
                ],
                Decimal::ONE,
                6000.0,
                Decimal::ZERO
            )
            .is_err());
        }

        #[test]
        fn zero_divisor_rejected() {
            assert!(WeightBandCargoFeeEvaluator::new(
                vec![WeightBand::new(1.0, Decimal::ONE)],
                Decimal::ONE,
                0.0,
                Decimal::ZERO
            )
            .is_err());
        }
    }
}
