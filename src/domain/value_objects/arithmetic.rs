//! # Fee Arithmetic
//!
//! Overflow-checked decimal math and the rounding rule for quoted fees.
//!
//! Fees are whole currency units. Intermediate values (a base fee times a
//! fractional multiplier) may carry decimals; only the final total is rounded,
//! half away from zero.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::arithmetic::{CheckedArithmetic, round_fee};
//! use rust_decimal::Decimal;
//!
//! let scaled = Decimal::new(20000, 0).safe_mul(Decimal::new(15, 1)).unwrap();
//! assert_eq!(round_fee(scaled), Decimal::new(30000, 0));
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// A fee computation left the representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Result does not fit a `Decimal`.
    #[error("arithmetic overflow")]
    Overflow,

    /// NaN or infinity where an amount was expected.
    #[error("non-finite amount: {0}")]
    NonFinite(&'static str),
}

/// Result type for fee arithmetic.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Rounds a fee to whole currency units, halves away from zero.
///
/// ```
/// use parcel_quote::domain::value_objects::arithmetic::round_fee;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_fee(Decimal::new(25, 1)), Decimal::new(3, 0));
/// assert_eq!(round_fee(Decimal::new(24999, 1)), Decimal::new(2500, 0));
/// ```
#[inline]
#[must_use]
pub fn round_fee(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a configured float into a [`Decimal`] using its shortest
/// representation, so `0.8` becomes exactly `0.8`.
///
/// # Errors
///
/// Returns `ArithmeticError::NonFinite` for NaN or infinity and
/// `ArithmeticError::Overflow` if the value does not fit.
pub fn decimal_from_f64(value: f64) -> ArithmeticResult<Decimal> {
    if value.is_nan() {
        return Err(ArithmeticError::NonFinite("NaN"));
    }
    if value.is_infinite() {
        return Err(ArithmeticError::NonFinite("infinity"));
    }
    Decimal::from_f64(value).ok_or(ArithmeticError::Overflow)
}

/// Checked operations used when composing a quote.
pub trait CheckedArithmetic: Sized {
    /// Adds, failing instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum does not fit.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Multiplies, failing instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the product does not fit.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }
}
