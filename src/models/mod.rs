use serde::{Deserialize, Serialize};

pub mod cart;
pub mod product;

pub use cart::{AddProductRequest, Cart, CartCreateRequest, CartItem, CartItemRequest};
pub use product::{Product, ProductInput, UploadedFile};

/// A scalar as it arrives from a request body.
///
/// Multipart forms always deliver text, JSON bodies may deliver booleans or
/// numbers for the same field; coercion happens in the managers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Whether the value counts as supplied. Only blank text is treated as
    /// absent; `false` and `0` are present values.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => true,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_deserializes_from_any_scalar() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 3, "3", ""]"#).unwrap();
        assert_eq!(values[0], FieldValue::Bool(true));
        assert_eq!(values[1], FieldValue::from(3u64));
        assert_eq!(values[2], FieldValue::from("3"));
        assert!(!values[3].is_present());
    }

    #[test]
    fn falsy_values_are_present() {
        assert!(FieldValue::from(false).is_present());
        assert!(FieldValue::from(0u64).is_present());
        assert!(FieldValue::from("0").is_present());
        assert!(FieldValue::from("false").is_present());
        assert!(!FieldValue::from("  ").is_present());
    }
}
