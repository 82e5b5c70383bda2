use oapi_spec::{SimpleType, ValueKind};
use serde_json::Value;

use super::Rule;
use crate::result::ValidationResult;

/// Checks the declared `type` against the value's shape.
#[derive(Debug)]
pub(crate) struct TypeRule {
    pub expected: SimpleType,
}

impl TypeRule {
    fn matches(&self, value: &Value) -> bool {
        match self.expected {
            SimpleType::String => value.is_string(),
            SimpleType::Number => value.is_number(),
            SimpleType::Integer => is_integral(value),
            SimpleType::Boolean => value.is_boolean(),
            SimpleType::Array => value.is_array(),
            SimpleType::Object => value.is_object(),
            SimpleType::Null => value.is_null(),
            // Uploads have no in-memory shape to check.
            SimpleType::File => true,
        }
    }
}

/// A number with no fractional part.
pub(crate) fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
        }
        _ => false,
    }
}

impl Rule for TypeRule {
    fn name(&self) -> &'static str {
        "type"
    }

    fn applies(&self, _kind: ValueKind) -> bool {
        true
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !self.matches(value) {
            result.add_error(
                path,
                format!(
                    "must be of type {}, found {}",
                    self.expected,
                    ValueKind::of(value)
                ),
            );
        }
        result.inc();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(expected: SimpleType, value: Value) -> ValidationResult {
        TypeRule { expected }.validate(&value, "")
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        assert!(check(SimpleType::Integer, json!(3)).is_valid());
        assert!(check(SimpleType::Integer, json!(3.0)).is_valid());
        assert!(!check(SimpleType::Integer, json!(3.5)).is_valid());
        assert!(!check(SimpleType::Integer, json!("3")).is_valid());
    }

    #[test]
    fn test_mismatch_message_names_both_kinds() {
        let result = check(SimpleType::Object, json!([1]));
        assert_eq!(result.errors()[0].message, "must be of type object, found array");
        assert_eq!(result.validation_count(), 1);
    }

    #[test]
    fn test_null_is_its_own_type() {
        assert!(check(SimpleType::Null, json!(null)).is_valid());
        assert!(!check(SimpleType::String, json!(null)).is_valid());
    }
}
