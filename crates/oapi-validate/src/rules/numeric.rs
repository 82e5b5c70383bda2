use oapi_spec::ValueKind;
use serde_json::Value;

use super::Rule;
use crate::result::ValidationResult;

/// One side of a numeric range.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bound {
    pub limit: f64,
    pub exclusive: bool,
}

/// `maximum`, `minimum`, and `multipleOf`.
#[derive(Debug)]
pub(crate) struct NumericRule {
    pub maximum: Option<Bound>,
    pub minimum: Option<Bound>,
    /// Always strictly positive.
    pub multiple_of: Option<f64>,
    pub tolerance: f64,
}

impl NumericRule {
    fn is_multiple(&self, n: f64, factor: f64) -> bool {
        let quotient = n / factor;
        (quotient - quotient.round()).abs() <= self.tolerance
    }
}

impl Rule for NumericRule {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn applies(&self, kind: ValueKind) -> bool {
        kind == ValueKind::Number
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.inc();
        let Some(n) = value.as_f64() else {
            return result;
        };

        if let Some(max) = self.maximum {
            if max.exclusive && n >= max.limit {
                result.add_error(path, format!("should be less than {}", max.limit));
            } else if !max.exclusive && n > max.limit {
                result.add_error(path, format!("should be less than or equal to {}", max.limit));
            }
        }
        if let Some(min) = self.minimum {
            if min.exclusive && n <= min.limit {
                result.add_error(path, format!("should be greater than {}", min.limit));
            } else if !min.exclusive && n < min.limit {
                result.add_error(
                    path,
                    format!("should be greater than or equal to {}", min.limit),
                );
            }
        }
        if let Some(factor) = self.multiple_of {
            if !self.is_multiple(n, factor) {
                result.add_error(path, format!("should be a multiple of {factor}"));
            }
        }
        result
    }
}
