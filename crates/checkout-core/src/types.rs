//! # Domain Types
//!
//! Core domain types of the checkout pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderRequest   │   │    LineItem     │   │ CheckoutSummary │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │   │  price (Money)  │   │  order_id       │       │
//! │  │  items ─────────┼──►│  qty            │   │  subtotal       │       │
//! │  │  coupon         │   └─────────────────┘   │  discount, tax  │       │
//! │  │  currency       │                         │  total          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │ CheckoutPolicy  │                             │
//! │  │  bps (u32)      │   │  tax_rate       │                             │
//! │  │  2100 = 21%     │   │  default_curr.  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `OrderRequest` only exists in validated form: it is built by
//! [`crate::validation::parse_request`] and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_CURRENCY, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage, for logs and display.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// User Id
// =============================================================================

/// Opaque customer identifier, passed through to the result unchanged.
///
/// Callers send either a number or a string; both forms are kept as-is
/// so the output echoes the input type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One position of the order. Both fields are strictly positive once
/// validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unit price in the smallest currency unit.
    pub price: Money,
    /// Quantity ordered.
    pub qty: i64,
}

impl LineItem {
    pub fn new(price: i64, qty: i64) -> Self {
        LineItem {
            price: Money::from_cents(price),
            qty,
        }
    }

    /// Line total (price × qty), `None` on overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.qty)
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// A validated checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub user_id: UserId,
    /// Never empty.
    pub items: Vec<LineItem>,
    /// Raw coupon code, trimmed. `None` when absent, null or blank.
    /// Resolved into a [`Coupon`](crate::coupon::Coupon) by the calculator.
    pub coupon: Option<String>,
    /// Already defaulted when the caller sent nothing.
    pub currency: String,
}

impl OrderRequest {
    /// Number of line items (positions, not total quantity).
    #[inline]
    pub fn items_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// The result record of one checkout.
///
/// Serializes to exactly the output map of the checkout entry point:
/// `order_id`, `user_id`, `currency`, `subtotal`, `discount`, `tax`,
/// `total`, `items_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSummary {
    pub order_id: String,
    pub user_id: UserId,
    pub currency: String,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub items_count: usize,
}

// =============================================================================
// Configuration Types
// =============================================================================

/// Tunable part of the checkout pipeline.
///
/// The defaults reproduce the fixed pricing rules: 21% tax and `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Flat tax rate applied after the discount.
    #[serde(default)]
    pub tax_rate: TaxRate,

    /// Currency used when the request has none (absent, null or empty).
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy {
            tax_rate: TaxRate::default(),
            default_currency: default_currency(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
