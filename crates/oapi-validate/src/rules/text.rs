use oapi_spec::ValueKind;
use regex::Regex;
use serde_json::Value;

use super::Rule;
use crate::result::ValidationResult;

/// `maxLength`, `minLength`, and `pattern`.
///
/// Lengths count Unicode scalar values. The pattern is searched for
/// anywhere in the string; anchor it to require a full match.
#[derive(Debug)]
pub(crate) struct TextRule {
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<Regex>,
}

impl Rule for TextRule {
    fn name(&self) -> &'static str {
        "text"
    }

    fn applies(&self, kind: ValueKind) -> bool {
        kind == ValueKind::Text
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.inc();
        let Some(text) = value.as_str() else {
            return result;
        };

        let length = text.chars().count() as u64;
        if let Some(max) = self.max_length {
            if length > max {
                result.add_error(path, format!("should be at most {max} chars long"));
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                result.add_error(path, format!("should be at least {min} chars long"));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                result.add_error(path, format!("should match '{}'", pattern.as_str()));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_counts_scalar_values() {
        let rule = TextRule {
            max_length: Some(3),
            min_length: Some(2),
            pattern: None,
        };
        assert!(rule.validate(&json!("日本語"), "").is_valid());
        assert_eq!(
            rule.validate(&json!("日本語!"), "").errors()[0].message,
            "should be at most 3 chars long"
        );
        assert_eq!(
            rule.validate(&json!("a"), "").errors()[0].message,
            "should be at least 2 chars long"
        );
    }

    #[test]
    fn test_pattern_searches() {
        let rule = TextRule {
            max_length: None,
            min_length: None,
            pattern: Some(Regex::new("[0-9]+").unwrap()),
        };
        assert!(rule.validate(&json!("abc123"), "").is_valid());
        let result = rule.validate(&json!("abc"), "code");
        assert_eq!(result.errors()[0].message, "should match '[0-9]+'");
        assert_eq!(result.validation_count(), 1);
    }

    #[test]
    fn test_anchors_in_pattern_require_full_match() {
        let rule = TextRule {
            max_length: None,
            min_length: None,
            pattern: Some(Regex::new("^[0-9]+$").unwrap()),
        };
        assert!(rule.validate(&json!("123"), "").is_valid());
        assert!(!rule.validate(&json!("abc123"), "").is_valid());
    }
}
