//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TRUNCATE AT EVERY STEP                                                 │
//! │                                                                         │
//! │  Every derived amount (discount, tax) is cut down to a whole unit       │
//! │  before the next step uses it:                                          │
//! │                                                                         │
//! │    subtotal 90   × 10%  =  9.0  → discount 9                            │
//! │    after    81   × 21%  = 17.01 → tax 17                                │
//! │    total    81 + 17     = 98                                            │
//! │                                                                         │
//! │  Percentages are basis points applied with integer division, so the    │
//! │  result is the exact mathematical truncation. No float ever appears.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_cents(30);
//! let line = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.cents(), 90);
//!
//! // 10% of 90, truncated
//! assert_eq!(line.percentage(1000), Some(Money::from_cents(9)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Inputs are treated as already-scaled integer units (cents, or plain
/// integers); the type never converts to or from floating point.
///
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the raw integer amount.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps the value to a floor of zero.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-40).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(40).clamp_non_negative().cents(), 40);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// LineItem: price 50, qty 2
    ///      │
    ///      ▼
    /// checked_multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line total: 100 ──► summed into the subtotal
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Returns `bps` basis points of this amount, truncated toward zero.
    ///
    /// For non-negative amounts this equals `floor(amount * bps / 10000)`.
    /// The product is taken in i128; `None` when the result does not fit
    /// back into i64 (only possible above 10000 bps).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(199).percentage(500), Some(Money::from_cents(9)));   // 9.95
    /// assert_eq!(Money::from_cents(200).percentage(2000), Some(Money::from_cents(40))); // 40.0
    /// assert_eq!(Money::from_cents(i64::MAX).percentage(20_000), None);
    /// ```
    pub fn percentage(&self, bps: u32) -> Option<Money> {
        let part = i128::from(self.0) * i128::from(bps) / 10_000;
        i64::try_from(part).ok().map(Money)
    }

    /// Calculates tax on this amount, truncating the fractional unit.
    ///
    /// Returns `None` if the tax does not fit in i64.
    ///
    /// ## Truncation, not rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  amount 100 × 21% = 21.00 → 21                                      │
    /// │  amount  81 × 21% = 17.01 → 17                                      │
    /// │  amount  95 × 21% = 19.95 → 19   (NOT 20)                           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::TaxRate;
    ///
    /// let tax = Money::from_cents(95).calculate_tax(TaxRate::from_bps(2100));
    /// assert_eq!(tax, Some(Money::from_cents(19)));
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.percentage(rate.bps())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
///
/// Only used on amounts already bounded by `checked_*` steps.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(format!("{}", money), "1099");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
    }

    #[test]
    fn test_checked_overflow() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!(big.checked_multiply_quantity(2), None);
        assert_eq!(big.checked_add(Money::from_cents(1)), None);
        assert_eq!(big.checked_multiply_quantity(1), Some(big));
    }

    fn pct(amount: i64, bps: u32) -> i64 {
        Money::from_cents(amount).percentage(bps).unwrap().cents()
    }

    #[test]
    fn test_percentage_truncates() {
        // 10% of 90 = 9
        assert_eq!(pct(90, 1000), 9);
        // 10% of 99 = 9.9 → 9
        assert_eq!(pct(99, 1000), 9);
        // 5% of 199 = 9.95 → 9
        assert_eq!(pct(199, 500), 9);
        assert_eq!(Money::zero().percentage(2000), Some(Money::zero()));
    }

    #[test]
    fn test_percentage_does_not_overflow() {
        // i64::MAX * 2100 would overflow i64; the i128 intermediate keeps it exact
        assert_eq!(
            pct(i64::MAX, 2100),
            (i64::MAX as i128 * 2100 / 10_000) as i64
        );
        assert_eq!(pct(i64::MAX, 10_000), i64::MAX);
    }

    #[test]
    fn test_percentage_out_of_range() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!(big.percentage(20_000), None);
        assert_eq!(Money::from_cents(i64::MIN).percentage(10_001), None);
        assert_eq!(big.calculate_tax(TaxRate::from_bps(u32::MAX)), None);
        // Above 100% is fine while the result still fits
        assert_eq!(pct(100, 20_000), 200);
    }

    #[test]
    fn test_tax_calculation() {
        let rate = TaxRate::from_bps(2100);
        let tax = |amount: i64| Money::from_cents(amount).calculate_tax(rate).map(|m| m.cents());
        assert_eq!(tax(100), Some(21));
        assert_eq!(tax(81), Some(17));
        assert_eq!(tax(0), Some(0));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-1).clamp_non_negative(), Money::zero());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::from_cents(-1).clamp_non_negative().is_negative());
        assert_eq!(
            Money::from_cents(7).clamp_non_negative(),
            Money::from_cents(7)
        );
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(121)).unwrap();
        assert_eq!(json, "121");
    }
}
