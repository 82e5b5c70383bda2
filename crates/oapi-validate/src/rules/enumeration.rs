use oapi_spec::ValueKind;
use serde_json::Value;

use super::Rule;
use crate::equality::values_equal;
use crate::result::ValidationResult;

/// Membership in `enum`, compared with [`values_equal`].
#[derive(Debug)]
pub(crate) struct EnumRule {
    pub values: Vec<Value>,
}

impl Rule for EnumRule {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn applies(&self, _kind: ValueKind) -> bool {
        true
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !self.values.iter().any(|allowed| values_equal(allowed, value)) {
            result.add_error(
                path,
                format!("should be one of {}", Value::Array(self.values.clone())),
            );
        }
        result.inc();
        result
    }
}
