//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CheckoutError    - Anything that aborts a checkout                │
//! │  └── ValidationError  - Malformed request input                        │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                  │
//! │  └── AppError         - I/O, JSON, config + wrapped CheckoutError      │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → AppError → exit status        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant carries the offending field or code
//! 3. Messages are stable: callers may match on them
//! 4. No partial results: any error aborts the whole checkout

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors that abort a checkout.
///
/// None of these are retried internally. The caller fixes the request
/// and resubmits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The request failed input validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Coupon code is not one of the known codes.
    ///
    /// Carries the code exactly as supplied (after trimming) so it can be
    /// reported back for diagnostics.
    #[error("unknown coupon: {0}")]
    UnknownCoupon(String),

    /// An intermediate amount does not fit in 64 bits.
    #[error("order amount is too large to process")]
    AmountOverflow,

    /// The summary could not be rendered as a JSON map.
    #[error("failed to render checkout summary: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns true if this error was caused by malformed input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CheckoutError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while converting the loosely-typed request into an
/// [`OrderRequest`](crate::types::OrderRequest). Validation stops at the
/// first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null.
    ///
    /// For line items the field is reported as `price_or_qty`.
    #[error("{}", missing_field_message(.field))]
    MissingField { field: String },

    /// Field is present but has the wrong JSON type.
    #[error("{}", invalid_type_message(.field))]
    InvalidType { field: String },

    /// A collection that must hold at least one element is empty.
    #[error("{field} must not be empty")]
    EmptyCollection { field: String },

    /// Numeric value must be strictly positive.
    #[error("{field} must be positive")]
    InvalidValue { field: String },

    /// Numeric value is positive and whole but too large for an amount.
    #[error("{field} is out of range")]
    OutOfRange { field: String },
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid_type(field: &str) -> Self {
        ValidationError::InvalidType {
            field: field.to_string(),
        }
    }

    pub fn empty(field: &str) -> Self {
        ValidationError::EmptyCollection {
            field: field.to_string(),
        }
    }

    pub fn invalid_value(field: &str) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
        }
    }

    pub fn out_of_range(field: &str) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
        }
    }

    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidType { field }
            | ValidationError::EmptyCollection { field }
            | ValidationError::InvalidValue { field }
            | ValidationError::OutOfRange { field } => field,
        }
    }
}

fn missing_field_message(field: &str) -> String {
    match field {
        crate::validation::FIELD_PRICE_OR_QTY => "item must have price and qty".to_string(),
        other => format!("{} is required", other),
    }
}

fn invalid_type_message(field: &str) -> String {
    match field {
        crate::validation::FIELD_ITEMS => "items must be a list".to_string(),
        other => format!("{} has invalid type", other),
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CoreResult<T> = Result<T, CheckoutError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
