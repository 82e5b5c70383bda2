use oapi_spec::ValueKind;
use serde_json::Value;

use super::{AdditionalPolicy, Rule};
use crate::equality::values_equal;
use crate::result::{join_path, ValidationResult};
use crate::validator::SchemaValidator;

/// Compiled `items`.
#[derive(Debug)]
pub(crate) enum ItemsPolicy {
    Single(SchemaValidator),
    Tuple(Vec<SchemaValidator>),
}

/// Element validation plus `maxItems`, `minItems`, and `uniqueItems`.
///
/// With a tuple of M schemas and a sequence of N elements, element `i` is
/// checked against schema `i` for `i < min(N, M)`. Extras beyond M are
/// governed by `additional`, which is consulted in tuple mode only. The
/// size constraints always see the whole sequence.
#[derive(Debug)]
pub(crate) struct ArrayRule {
    pub items: Option<ItemsPolicy>,
    pub additional: Option<AdditionalPolicy>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique: bool,
}

impl ArrayRule {
    fn validate_elements(&self, elements: &[Value], path: &str, result: &mut ValidationResult) {
        match &self.items {
            Some(ItemsPolicy::Single(validator)) => {
                for (i, element) in elements.iter().enumerate() {
                    result.merge(validator.validate_at(element, &join_path(path, i)));
                }
            }
            Some(ItemsPolicy::Tuple(validators)) => {
                for (i, (validator, element)) in validators.iter().zip(elements).enumerate() {
                    result.merge(validator.validate_at(element, &join_path(path, i)));
                }
                let declared = validators.len();
                if elements.len() <= declared {
                    return;
                }
                match &self.additional {
                    Some(AdditionalPolicy::Forbid) => {
                        result.add_error(path, "no additional items allowed");
                    }
                    Some(AdditionalPolicy::Schema(validator)) => {
                        for (i, element) in elements.iter().enumerate().skip(declared) {
                            result.merge(validator.validate_at(element, &join_path(path, i)));
                        }
                    }
                    Some(AdditionalPolicy::Allow) | None => {}
                }
            }
            None => {}
        }
    }
}

fn has_duplicates(elements: &[Value]) -> bool {
    elements
        .iter()
        .enumerate()
        .any(|(i, a)| elements[i + 1..].iter().any(|b| values_equal(a, b)))
}

impl Rule for ArrayRule {
    fn name(&self) -> &'static str {
        "array"
    }

    fn applies(&self, kind: ValueKind) -> bool {
        kind == ValueKind::Sequence
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.inc();
        let Some(elements) = value.as_array() else {
            return result;
        };

        self.validate_elements(elements, path, &mut result);

        let size = elements.len() as u64;
        if let Some(min) = self.min_items {
            if size < min {
                result.add_error(path, format!("should have at least {min} items"));
            }
        }
        if let Some(max) = self.max_items {
            if size > max {
                result.add_error(path, format!("should have at most {max} items"));
            }
        }
        if self.unique && has_duplicates(elements) {
            result.add_error(path, "shouldn't contain duplicates");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oapi_spec::{Schema, SimpleType};
    use serde_json::json;

    fn string_validator() -> SchemaValidator {
        SchemaValidator::new(&Schema::new().typed(SimpleType::String, None).into_node()).unwrap()
    }

    fn tuple_rule(size: usize, additional: Option<AdditionalPolicy>) -> ArrayRule {
        ArrayRule {
            items: Some(ItemsPolicy::Tuple((0..size).map(|_| string_validator()).collect())),
            additional,
            max_items: None,
            min_items: None,
            unique: false,
        }
    }

    #[test]
    fn test_single_schema_checks_every_element() {
        let rule = ArrayRule {
            items: Some(ItemsPolicy::Single(string_validator())),
            additional: None,
            max_items: None,
            min_items: None,
            unique: false,
        };
        let result = rule.validate(&json!(["a", 1, "c", false]), "tags");
        let paths: Vec<&str> = result.errors().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["tags.1", "tags.3"]);
        assert_eq!(result.validation_count(), 5);
    }

    #[test]
    fn test_forbidden_extras_report_once() {
        let rule = tuple_rule(2, Some(AdditionalPolicy::Forbid));
        let result = rule.validate(&json!(["a", "b", "c", "d", "e"]), "");
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].message, "no additional items allowed");
    }

    #[test]
    fn test_short_tuple_is_fine() {
        let rule = tuple_rule(3, Some(AdditionalPolicy::Forbid));
        let result = rule.validate(&json!(["a"]), "");
        assert!(result.is_valid());
        assert_eq!(result.validation_count(), 2);
    }

    #[test]
    fn test_additional_schema_checks_each_extra() {
        let rule = tuple_rule(1, Some(AdditionalPolicy::Schema(string_validator())));
        let result = rule.validate(&json!(["a", 2, "c", 4]), "row");
        let paths: Vec<&str> = result.errors().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["row.1", "row.3"]);
        assert_eq!(result.validation_count(), 5);
    }

    #[test]
    fn test_additional_ignored_without_tuple() {
        let rule = ArrayRule {
            items: None,
            additional: Some(AdditionalPolicy::Forbid),
            max_items: None,
            min_items: None,
            unique: false,
        };
        assert!(rule.validate(&json!([1, 2, 3]), "").is_valid());
    }

    #[test]
    fn test_size_and_uniqueness() {
        let rule = ArrayRule {
            items: None,
            additional: None,
            max_items: Some(2),
            min_items: Some(1),
            unique: true,
        };
        let messages: Vec<String> = rule
            .validate(&json!([1, 1.0, 2]), "")
            .errors()
            .iter()
            .map(|v| v.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec!["should have at most 2 items", "shouldn't contain duplicates"]
        );
        assert_eq!(
            rule.validate(&json!([]), "").errors()[0].message,
            "should have at least 1 items"
        );
    }
}
