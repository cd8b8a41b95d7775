//! Utility functions and helpers.
//!
//! - [`formatters`]: French date formatting for epoch and LDAP timestamps
//! - [`is_truthy`]: loose truthiness of JSON values, used for optional flags
//!
//! # Examples
//!
//! ```
//! use realm_export::utils::is_truthy;
//! use serde_json::json;
//!
//! assert!(is_truthy(&json!(true)));
//! assert!(!is_truthy(&json!(0)));
//! assert!(!is_truthy(&json!("")));
//! ```

/// Date and time formatting helpers
pub mod formatters;

use serde_json::Value;

/// Returns whether a JSON value counts as "set" for flag-like fields.
///
/// `null`, `false`, zero, non-finite numbers, and the empty string are falsy.
/// Every other value, including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && f.is_finite()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Same as [`is_truthy`] with an absent value treated as falsy
#[must_use]
pub fn is_truthy_opt(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}
