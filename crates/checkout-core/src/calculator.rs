//! # Checkout Calculator
//!
//! The checkout pipeline: one pass from raw request to summary.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw request (JSON map)                                                 │
//! │      │                                                                  │
//! │      ▼  parse + validate ─────────────► ValidationError                 │
//! │  OrderRequest                                                           │
//! │      │                                                                  │
//! │      ▼  compute_subtotal   Σ price × qty ──► AmountOverflow             │
//! │      ▼  compute_discount   coupon rules ───► UnknownCoupon              │
//! │      ▼  clamp              max(0, subtotal - discount)                  │
//! │      ▼  compute_tax        floor(amount × 21%)                          │
//! │      ▼  total              amount + tax                                 │
//! │      ▼  generate_order_id  "{user}-{count}-X"                           │
//! │  CheckoutSummary                                                        │
//! │                                                                         │
//! │  Any error aborts the whole pass; nothing partial is returned.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The calculator holds only its immutable [`CheckoutPolicy`]. It is
//! `Send + Sync` and can be shared freely; calls do not interact.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::coupon::Coupon;
use crate::error::{CheckoutError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutPolicy, CheckoutSummary, LineItem, OrderRequest, UserId};
use crate::validation;

/// Computes checkout summaries.
///
/// ## Example
/// ```rust
/// use checkout_core::CheckoutCalculator;
/// use serde_json::json;
///
/// let calculator = CheckoutCalculator::new();
/// let summary = calculator
///     .process(&json!({"user_id": 1, "items": [{"price": 50, "qty": 2}], "coupon": null}))
///     .unwrap();
///
/// assert_eq!(summary.subtotal.cents(), 100);
/// assert_eq!(summary.tax.cents(), 21);
/// assert_eq!(summary.total.cents(), 121);
/// assert_eq!(summary.order_id, "1-1-X");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckoutCalculator {
    policy: CheckoutPolicy,
}

impl CheckoutCalculator {
    /// Creates a calculator with the default policy (21% tax, USD).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with a custom policy.
    pub fn with_policy(policy: CheckoutPolicy) -> Self {
        CheckoutCalculator { policy }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    /// Validates a raw request without computing anything.
    pub fn validate(&self, request: &Value) -> CoreResult<()> {
        self.parse(request).map(|_| ())
    }

    /// Parses a raw request into its typed form.
    pub fn parse(&self, request: &Value) -> CoreResult<OrderRequest> {
        validation::parse_request(request, &self.policy.default_currency).map_err(|e| {
            warn!(field = %e.field(), error = %e, "Rejected checkout request");
            CheckoutError::from(e)
        })
    }

    /// Runs the full pipeline on a raw request.
    pub fn process(&self, request: &Value) -> CoreResult<CheckoutSummary> {
        let order = self.parse(request)?;
        self.process_order(&order)
    }

    /// Map-in, map-out variant of [`process`](Self::process).
    ///
    /// The returned object has exactly the keys `order_id`, `user_id`,
    /// `currency`, `subtotal`, `discount`, `tax`, `total`, `items_count`.
    pub fn process_value(&self, request: &Value) -> CoreResult<Value> {
        let summary = self.process(request)?;
        serde_json::to_value(&summary).map_err(|e| CheckoutError::Serialization(e.to_string()))
    }

    /// Runs the pipeline on an already validated request.
    pub fn process_order(&self, order: &OrderRequest) -> CoreResult<CheckoutSummary> {
        let subtotal = self.compute_subtotal(&order.items)?;
        let discount = self.compute_discount(order.coupon.as_deref(), subtotal)?;
        let after_discount = (subtotal - discount).clamp_non_negative();
        let tax = self.compute_tax(after_discount)?;
        let total = after_discount
            .checked_add(tax)
            .ok_or(CheckoutError::AmountOverflow)?;

        let items_count = order.items_count();
        let order_id = Self::generate_order_id(&order.user_id, items_count);

        info!(
            order_id = %order_id,
            subtotal = %subtotal,
            discount = %discount,
            tax = %tax,
            total = %total,
            currency = %order.currency,
            "Checkout computed"
        );

        Ok(CheckoutSummary {
            order_id,
            user_id: order.user_id.clone(),
            currency: order.currency.clone(),
            subtotal,
            discount,
            tax,
            total,
            items_count,
        })
    }

    // =========================================================================
    // Pipeline Steps
    // =========================================================================

    /// Sums `price × qty` over all items, in list order.
    pub fn compute_subtotal(&self, items: &[LineItem]) -> CoreResult<Money> {
        let subtotal = items.iter().try_fold(Money::zero(), |acc, item| {
            item.line_total().and_then(|line| acc.checked_add(line))
        });

        let subtotal = subtotal.ok_or(CheckoutError::AmountOverflow)?;
        debug!(items = items.len(), subtotal = %subtotal, "Subtotal computed");
        Ok(subtotal)
    }

    /// Resolves the coupon code and calculates its discount.
    ///
    /// `None` or a blank code means no discount.
    pub fn compute_discount(&self, coupon: Option<&str>, subtotal: Money) -> CoreResult<Money> {
        let coupon =
            Coupon::parse(coupon).inspect_err(|e| warn!(error = %e, "Rejected coupon"))?;

        let discount = coupon
            .discount(subtotal)
            .ok_or(CheckoutError::AmountOverflow)?;
        debug!(coupon = %coupon, subtotal = %subtotal, discount = %discount, "Discount computed");
        Ok(discount)
    }

    /// Calculates tax on the discounted amount (truncated).
    ///
    /// Fails with `AmountOverflow` when a rate above 100% pushes the tax
    /// past i64.
    pub fn compute_tax(&self, amount: Money) -> CoreResult<Money> {
        let rate = self.policy.tax_rate;
        let tax = amount
            .calculate_tax(rate)
            .ok_or(CheckoutError::AmountOverflow)?;
        debug!(amount = %amount, rate_pct = rate.percentage(), tax = %tax, "Tax computed");
        Ok(tax)
    }

    /// Builds the order id `"{user_id}-{items_count}-X"`.
    ///
    /// Deterministic: two orders from the same user with the same number
    /// of items get the same id.
    pub fn generate_order_id(user_id: &UserId, items_count: usize) -> String {
        format!("{}-{}-X", user_id, items_count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
