//! # Validation Module
//!
//! Converts the loosely-typed request map into a trusted [`OrderRequest`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Request Boundary                                   │
//! │                                                                         │
//! │  serde_json::Value (anything the caller sent)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  parse_request() ← THIS MODULE                                         │
//! │  ├── user_id   present, integer or string                              │
//! │  ├── items     present, a list, not empty                              │
//! │  │   └── each: price and qty present, whole numbers, > 0               │
//! │  ├── coupon    string or null                                          │
//! │  └── currency  string, or any falsy value (defaulted)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  OrderRequest (strongly typed, immutable)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Calculator pipeline: no further "is this present?" checks             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checks run in the order above and stop at the first failure; items are
//! checked in list order. Nothing collects a batch of errors.
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::validate_request;
//! use serde_json::json;
//!
//! assert!(validate_request(&json!({"user_id": 1, "items": [{"price": 5, "qty": 1}]})).is_ok());
//! assert!(validate_request(&json!({"user_id": 1, "items": []})).is_err());
//! ```

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationResult};
use crate::types::{LineItem, OrderRequest, UserId};
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Field Names
// =============================================================================

pub const FIELD_REQUEST: &str = "request";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QTY: &str = "qty";
/// Reported when a line item lacks either of its two keys.
pub const FIELD_PRICE_OR_QTY: &str = "price_or_qty";
pub const FIELD_COUPON: &str = "coupon";
pub const FIELD_CURRENCY: &str = "currency";

// =============================================================================
// Request Parsing
// =============================================================================

/// Validates a raw request without building the typed request.
///
/// Uses the same rules as [`parse_request`].
pub fn validate_request(request: &Value) -> ValidationResult<()> {
    parse_request(request, DEFAULT_CURRENCY).map(|_| ())
}

/// Parses and validates a raw request map.
///
/// `default_currency` replaces a currency that is absent or falsy.
pub fn parse_request(request: &Value, default_currency: &str) -> ValidationResult<OrderRequest> {
    let map = request
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type(FIELD_REQUEST))?;

    let user_id = parse_user_id(map)?;
    let items = parse_items(map)?;
    let coupon = parse_coupon(map)?;
    let currency = parse_currency(map, default_currency)?;

    Ok(OrderRequest {
        user_id,
        items,
        coupon,
        currency,
    })
}

/// Returns the value for `key` unless it is absent or JSON null.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn parse_user_id(map: &Map<String, Value>) -> ValidationResult<UserId> {
    match present(map, FIELD_USER_ID) {
        None => Err(ValidationError::missing(FIELD_USER_ID)),
        Some(Value::String(s)) => Ok(UserId::Text(s.clone())),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(UserId::Number)
            .ok_or_else(|| ValidationError::invalid_type(FIELD_USER_ID)),
        Some(_) => Err(ValidationError::invalid_type(FIELD_USER_ID)),
    }
}

fn parse_items(map: &Map<String, Value>) -> ValidationResult<Vec<LineItem>> {
    let raw = present(map, FIELD_ITEMS).ok_or_else(|| ValidationError::missing(FIELD_ITEMS))?;

    let list = raw
        .as_array()
        .ok_or_else(|| ValidationError::invalid_type(FIELD_ITEMS))?;

    if list.is_empty() {
        return Err(ValidationError::empty(FIELD_ITEMS));
    }

    list.iter().map(parse_item).collect()
}

/// Validates a single line item.
///
/// ## Rules
/// - Must be a map with both `price` and `qty` (non-null)
/// - Both must be numbers; `price` is checked fully before `qty`
/// - A number ≤ 0 is `InvalidValue`, a fractional one is `InvalidType`
/// - Whole floats such as `50.0` are accepted
pub fn parse_item(item: &Value) -> ValidationResult<LineItem> {
    let fields = item
        .as_object()
        .ok_or_else(|| ValidationError::missing(FIELD_PRICE_OR_QTY))?;

    let (price, qty) = match (present(fields, FIELD_PRICE), present(fields, FIELD_QTY)) {
        (Some(price), Some(qty)) => (price, qty),
        _ => return Err(ValidationError::missing(FIELD_PRICE_OR_QTY)),
    };

    let price = positive_integer(price, FIELD_PRICE)?;
    let qty = positive_integer(qty, FIELD_QTY)?;

    Ok(LineItem::new(price, qty))
}

/// 2^63 as f64; every whole float below it converts to i64 exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn positive_integer(value: &Value, field: &str) -> ValidationResult<i64> {
    let Value::Number(number) = value else {
        return Err(ValidationError::invalid_type(field));
    };

    if let Some(n) = number.as_i64() {
        return if n > 0 {
            Ok(n)
        } else {
            Err(ValidationError::invalid_value(field))
        };
    }

    // Integer above i64::MAX
    if number.as_u64().is_some() {
        return Err(ValidationError::out_of_range(field));
    }

    let f = number
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_type(field))?;

    if f <= 0.0 {
        return Err(ValidationError::invalid_value(field));
    }
    if f.fract() != 0.0 {
        return Err(ValidationError::invalid_type(field));
    }
    if f >= I64_BOUND {
        return Err(ValidationError::out_of_range(field));
    }

    Ok(f as i64)
}

fn parse_coupon(map: &Map<String, Value>) -> ValidationResult<Option<String>> {
    match present(map, FIELD_COUPON) {
        None => Ok(None),
        Some(Value::String(s)) => {
            let code = s.trim();
            if code.is_empty() {
                Ok(None)
            } else {
                Ok(Some(code.to_string()))
            }
        }
        Some(_) => Err(ValidationError::invalid_type(FIELD_COUPON)),
    }
}

fn parse_currency(map: &Map<String, Value>, default_currency: &str) -> ValidationResult<String> {
    match map.get(FIELD_CURRENCY) {
        None => Ok(default_currency.to_string()),
        Some(v) if is_falsy(v) => Ok(default_currency.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::invalid_type(FIELD_CURRENCY)),
    }
}

/// `null`, `false`, zero, and empty strings, lists and maps.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use serde_json::json;

    fn parse(v: Value) -> ValidationResult<OrderRequest> {
        parse_request(&v, "USD")
    }

    #[test]
    fn test_valid_request() {
        let req = parse(json!({
            "user_id": 7,
            "items": [{"price": 50, "qty": 2}, {"price": 3, "qty": 1}],
            "coupon": " SAVE10 ",
            "currency": "EUR"
        }))
        .unwrap();

        assert_eq!(req.user_id, UserId::Number(7));
        assert_eq!(req.items_count(), 2);
        assert_eq!(req.items[0].price, Money::from_cents(50));
        assert_eq!(req.items[1].qty, 1);
        assert_eq!(req.coupon.as_deref(), Some("SAVE10"));
        assert_eq!(req.currency, "EUR");
    }

    #[test]
    fn test_string_user_id() {
        let req = parse(json!({"user_id": "abc", "items": [{"price": 1, "qty": 1}]})).unwrap();
        assert_eq!(req.user_id, UserId::Text("abc".to_string()));
    }

    #[test]
    fn test_currency_defaults() {
        let item = json!([{"price": 1, "qty": 1}]);
        for currency in [Value::Null, json!(""), json!(false), json!(0), json!(0.0), json!([]), json!({})] {
            let req = parse(json!({"user_id": 1, "items": item, "currency": currency})).unwrap();
            assert_eq!(req.currency, "USD");
        }
        let req = parse(json!({"user_id": 1, "items": item})).unwrap();
        assert_eq!(req.currency, "USD");

        let req = parse_request(&json!({"user_id": 1, "items": item}), "GBP").unwrap();
        assert_eq!(req.currency, "GBP");
    }

    #[test]
    fn test_blank_coupon_is_none() {
        let item = json!([{"price": 1, "qty": 1}]);
        for coupon in [Value::Null, json!(""), json!("   ")] {
            let req = parse(json!({"user_id": 1, "items": item, "coupon": coupon})).unwrap();
            assert_eq!(req.coupon, None);
        }
    }

    #[test]
    fn test_missing_user_id() {
        let err = parse(json!({"items": [{"price": 10, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::missing("user_id"));

        let err = parse(json!({"user_id": null, "items": [{"price": 10, "qty": 1}]})).unwrap_err();
        assert_eq!(err.to_string(), "user_id is required");
    }

    #[test]
    fn test_invalid_user_id_type() {
        let err = parse(json!({"user_id": [1], "items": [{"price": 10, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("user_id"));

        let err = parse(json!({"user_id": 1.5, "items": [{"price": 10, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("user_id"));
    }

    #[test]
    fn test_missing_items() {
        let err = parse(json!({"user_id": 1})).unwrap_err();
        assert_eq!(err.to_string(), "items is required");
    }

    #[test]
    fn test_items_not_a_list() {
        let err = parse(json!({"user_id": 1, "items": "not a list"})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("items"));
        assert_eq!(err.to_string(), "items must be a list");
    }

    #[test]
    fn test_empty_items() {
        let err = parse(json!({"user_id": 1, "items": []})).unwrap_err();
        assert_eq!(err, ValidationError::empty("items"));
        assert_eq!(err.to_string(), "items must not be empty");
    }

    #[test]
    fn test_item_missing_key() {
        for item in [json!({"qty": 1}), json!({"price": 1}), json!({"price": null, "qty": 1}), json!(5)] {
            let err = parse(json!({"user_id": 1, "items": [item]})).unwrap_err();
            assert_eq!(err.to_string(), "item must have price and qty");
        }
    }

    #[test]
    fn test_item_non_positive_values() {
        let err = parse(json!({"user_id": 1, "items": [{"price": -10, "qty": 1}]})).unwrap_err();
        assert_eq!(err.to_string(), "price must be positive");

        let err = parse(json!({"user_id": 1, "items": [{"price": 10, "qty": 0}]})).unwrap_err();
        assert_eq!(err.to_string(), "qty must be positive");

        // Price is checked before qty
        let err = parse(json!({"user_id": 1, "items": [{"price": 0, "qty": 0}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_value("price"));
    }

    #[test]
    fn test_item_non_integer_values() {
        let err = parse(json!({"user_id": 1, "items": [{"price": "10", "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("price"));

        let err = parse(json!({"user_id": 1, "items": [{"price": 10, "qty": 1.5}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("qty"));

        let err = parse(json!({"user_id": 1, "items": [{"price": true, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("price"));
    }

    #[test]
    fn test_item_negative_float_is_invalid_value() {
        let err = parse(json!({"user_id": 1, "items": [{"price": -1.5, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_value("price"));

        let err = parse(json!({"user_id": 1, "items": [{"price": 10, "qty": 0.0}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_value("qty"));

        let err = parse(json!({"user_id": 1, "items": [{"price": 0.5, "qty": -2}]})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("price"));
    }

    #[test]
    fn test_item_whole_floats_accepted() {
        let req = parse(json!({"user_id": 1, "items": [{"price": 50.0, "qty": 2.0}]})).unwrap();
        assert_eq!(req.items[0].price, Money::from_cents(50));
        assert_eq!(req.items[0].qty, 2);
    }

    #[test]
    fn test_item_out_of_range() {
        let err = parse(json!({"user_id": 1, "items": [{"price": u64::MAX, "qty": 1}]})).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("price"));

        let err = parse(json!({"user_id": 1, "items": [{"price": 1, "qty": 1e19}]})).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("qty"));

        let req = parse(json!({"user_id": 1, "items": [{"price": i64::MAX, "qty": 1}]})).unwrap();
        assert_eq!(req.items[0].price, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_first_failing_item_wins() {
        let err = parse(json!({
            "user_id": 1,
            "items": [
                {"price": 10, "qty": 1},
                {"price": 10, "qty": -1},
                {"qty": 1}
            ]
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::invalid_value("qty"));
    }

    #[test]
    fn test_field_order() {
        // user_id is reported before items
        let err = parse(json!({"items": []})).unwrap_err();
        assert_eq!(err, ValidationError::missing("user_id"));

        // items are reported before coupon/currency
        let err = parse(json!({"user_id": 1, "items": [], "coupon": 5})).unwrap_err();
        assert_eq!(err, ValidationError::empty("items"));
    }

    #[test]
    fn test_coupon_and_currency_types() {
        let item = json!([{"price": 1, "qty": 1}]);
        let err = parse(json!({"user_id": 1, "items": item, "coupon": 10})).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("coupon"));

        for currency in [json!(5), json!(true), json!([""]), json!({"code": "EUR"})] {
            let err = parse(json!({"user_id": 1, "items": item, "currency": currency})).unwrap_err();
            assert_eq!(err, ValidationError::invalid_type("currency"));
        }

        // Whitespace is truthy and passes through untouched
        let req = parse(json!({"user_id": 1, "items": item, "currency": " "})).unwrap();
        assert_eq!(req.currency, " ");
    }

    #[test]
    fn test_request_not_a_map() {
        let err = parse(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::invalid_type("request"));
    }

    #[test]
    fn test_validate_request() {
        assert!(validate_request(&json!({"user_id": 1, "items": [{"price": 1, "qty": 1}]})).is_ok());
        assert!(validate_request(&json!({"user_id": 1})).is_err());
    }
}
