//! JSON type classification.

use std::fmt;

use serde_json::Value;

/// The six JSON type tags a value can classify to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Whether values of this type can carry members of their own.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonType::Array | JsonType::Object)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(tag)
    }
}

/// Classify a JSON value into its type tag.
///
/// # Example
///
/// ```
/// use json_tree_view::{classify, JsonType};
/// use serde_json::json;
///
/// assert_eq!(classify(&json!(null)), JsonType::Null);
/// assert_eq!(classify(&json!(42)), JsonType::Number);
/// assert_eq!(classify(&json!({"a": 1})), JsonType::Object);
/// ```
pub fn classify(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(_) => JsonType::Number,
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}
