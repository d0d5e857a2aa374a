//! Coercion of request scalars into record field types.

use crate::models::FieldValue;

/// Coerce a status value into a boolean.
///
/// Accepts JSON booleans, the numbers 0 and 1, and the case-insensitive
/// spellings `true/false`, `1/0`, `yes/no`, `on/off`. Anything else is
/// `None`.
pub fn to_boolean(value: &FieldValue) -> Option<bool> {
    match value {
        FieldValue::Bool(b) => Some(*b),
        FieldValue::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
    }
}

/// Coerce a stock value into a non-negative integer.
pub fn to_stock(value: &FieldValue) -> Option<u64> {
    match value {
        FieldValue::Number(n) => n.as_u64(),
        FieldValue::Text(s) => s.trim().parse::<u64>().ok(),
        FieldValue::Bool(_) => None,
    }
}
