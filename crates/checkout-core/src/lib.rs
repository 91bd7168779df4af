//! # checkout-core: Pure Checkout Logic
//!
//! This crate computes an order checkout summary: subtotal, coupon
//! discount, tax and total. Everything is a pure function of the request.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Workspace                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Host (checkout-cli, or an embedding service)           │   │
//! │  │      config loading, logging setup, reading/writing JSON       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ serde_json::Value                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │  │  coupon   │  │   money   │  │calculator │  │   │
//! │  │   │  request  │  │  Coupon   │  │   Money   │  │ pipeline  │  │   │
//! │  │   │  parsing  │  │  rules    │  │  TaxRate  │  │  summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STATE • NO FLOATS IN MONEY MATH                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (OrderRequest, LineItem, CheckoutSummary, ...)
//! - [`money`] - Integer money with truncating percentage math
//! - [`coupon`] - Closed set of coupon codes and their discount rules
//! - [`validation`] - Raw request → typed request
//! - [`calculator`] - The checkout pipeline
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{CheckoutCalculator, CheckoutError};
//! use serde_json::json;
//!
//! let calculator = CheckoutCalculator::new();
//!
//! let summary = calculator
//!     .process(&json!({"user_id": 2, "items": [{"price": 30, "qty": 3}], "coupon": "SAVE10"}))
//!     .unwrap();
//! assert_eq!(summary.discount.cents(), 9);
//!
//! let err = calculator
//!     .process(&json!({"user_id": 1, "items": [{"price": 10, "qty": 1}], "coupon": "???"}))
//!     .unwrap_err();
//! assert!(matches!(err, CheckoutError::UnknownCoupon(_)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod coupon;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::CheckoutCalculator;
pub use coupon::Coupon;
pub use error::{CheckoutError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a request carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Flat tax rate in basis points (21%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 2100;
