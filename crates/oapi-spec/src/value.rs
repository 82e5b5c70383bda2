//! # Value Shapes
//!
//! Runtime data is carried as `serde_json::Value`, which is already a
//! closed set of tagged variants. [`ValueKind`] names those variants the
//! way constraint rules reason about them.

use std::fmt;

use serde_json::Value;

/// The runtime shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// A string.
    Text,
    /// An array.
    Sequence,
    /// An object.
    Mapping,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::Text,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    /// The schema type name that best describes this shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Text => "string",
            Self::Sequence => "array",
            Self::Mapping => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
