//! # Coupon Module
//!
//! Discount policy keyed by coupon code.
//!
//! ## Discount Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code     Rule                                                          │
//! │  ───────  ──────────────────────────────────────────────────────────    │
//! │  (none)   0                                                             │
//! │  SAVE10   10% of subtotal                                               │
//! │  SAVE20   subtotal >= 200 → 20%      subtotal < 200 → 5%                │
//! │  VIP      subtotal >= 100 → flat 50  subtotal < 100 → flat 10           │
//! │                                                                         │
//! │  SAVE20 is a ramp: the rate steps up at the threshold.                 │
//! │  VIP is a cliff: a flat rebate that jumps at the threshold.            │
//! │  At exactly the threshold both take the larger branch.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Codes are parsed once into [`Coupon`]; the discount itself is an
//! exhaustive match, so a new code cannot be added without a rule.

use std::fmt;
use std::str::FromStr;

use crate::error::{CheckoutError, CoreResult};
use crate::money::Money;

// =============================================================================
// Policy Constants
// =============================================================================

/// SAVE10 rate: 10%.
pub const SAVE10_BPS: u32 = 1000;

/// SAVE20 rate at or above [`SAVE20_THRESHOLD`]: 20%.
pub const SAVE20_PREMIUM_BPS: u32 = 2000;

/// SAVE20 rate below [`SAVE20_THRESHOLD`]: 5%.
pub const SAVE20_REGULAR_BPS: u32 = 500;

/// Subtotal from which SAVE20 uses the premium rate.
pub const SAVE20_THRESHOLD: Money = Money::from_cents(200);

/// Subtotal from which VIP grants the large rebate.
pub const VIP_THRESHOLD: Money = Money::from_cents(100);

/// VIP rebate below [`VIP_THRESHOLD`].
pub const VIP_SMALL_REBATE: Money = Money::from_cents(10);

/// VIP rebate at or above [`VIP_THRESHOLD`].
pub const VIP_LARGE_REBATE: Money = Money::from_cents(50);

// =============================================================================
// Coupon
// =============================================================================

/// A recognised coupon, or the absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Coupon {
    /// No coupon supplied (absent, null, empty or whitespace only).
    #[default]
    NoCoupon,
    Save10,
    Save20,
    Vip,
}

impl Coupon {
    /// Parses an optional raw coupon field.
    ///
    /// Surrounding whitespace is ignored. Matching is case-sensitive.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon::Coupon;
    ///
    /// assert_eq!(Coupon::parse(None).unwrap(), Coupon::NoCoupon);
    /// assert_eq!(Coupon::parse(Some("  ")).unwrap(), Coupon::NoCoupon);
    /// assert_eq!(Coupon::parse(Some(" VIP ")).unwrap(), Coupon::Vip);
    /// assert!(Coupon::parse(Some("vip")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> CoreResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Coupon::NoCoupon),
            Some(code) => code.parse(),
        }
    }

    /// Returns the code as the customer types it, `None` for [`Coupon::NoCoupon`].
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Coupon::NoCoupon => None,
            Coupon::Save10 => Some("SAVE10"),
            Coupon::Save20 => Some("SAVE20"),
            Coupon::Vip => Some("VIP"),
        }
    }

    /// Calculates the discount this coupon grants on `subtotal`.
    ///
    /// Never negative for a non-negative subtotal. The flat VIP rebate may
    /// exceed the subtotal; the caller clamps the discounted amount.
    /// `None` only if a percentage falls outside i64, which the rates used
    /// here (all at most 100%) cannot produce.
    ///
    /// ## User Workflow
    /// ```text
    /// Subtotal: 199, coupon SAVE20
    ///      │
    ///      ▼
    /// discount() ← THIS FUNCTION
    ///      │
    ///      ├── 199 >= 200? no → 5% → 9.95 → 9
    ///      │
    ///      ▼
    /// Discount: 9
    /// ```
    pub fn discount(&self, subtotal: Money) -> Option<Money> {
        match self {
            Coupon::NoCoupon => Some(Money::zero()),
            Coupon::Save10 => subtotal.percentage(SAVE10_BPS),
            Coupon::Save20 => {
                if subtotal >= SAVE20_THRESHOLD {
                    subtotal.percentage(SAVE20_PREMIUM_BPS)
                } else {
                    subtotal.percentage(SAVE20_REGULAR_BPS)
                }
            }
            Coupon::Vip => {
                if subtotal < VIP_THRESHOLD {
                    Some(VIP_SMALL_REBATE)
                } else {
                    Some(VIP_LARGE_REBATE)
                }
            }
        }
    }
}

impl FromStr for Coupon {
    type Err = CheckoutError;

    /// Parses a single, already trimmed, non-empty code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAVE10" => Ok(Coupon::Save10),
            "SAVE20" => Ok(Coupon::Save20),
            "VIP" => Ok(Coupon::Vip),
            other => Err(CheckoutError::UnknownCoupon(other.to_string())),
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("none"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
