use std::collections::BTreeMap;

use oapi_spec::ValueKind;
use serde_json::Value;

use super::{AdditionalPolicy, Rule};
use crate::result::{join_path, ValidationResult};
use crate::validator::SchemaValidator;

/// `properties`, `required`, `additionalProperties`, and the property
/// count bounds.
#[derive(Debug)]
pub(crate) struct ObjectRule {
    pub properties: BTreeMap<String, SchemaValidator>,
    pub required: Vec<String>,
    pub additional: Option<AdditionalPolicy>,
    pub max_properties: Option<u64>,
    pub min_properties: Option<u64>,
}

impl Rule for ObjectRule {
    fn name(&self) -> &'static str {
        "object"
    }

    fn applies(&self, kind: ValueKind) -> bool {
        kind == ValueKind::Mapping
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.inc();
        let Some(members) = value.as_object() else {
            return result;
        };

        for name in &self.required {
            if !members.contains_key(name) {
                result.add_error(&join_path(path, name), "is required");
            }
        }

        let count = members.len() as u64;
        if let Some(min) = self.min_properties {
            if count < min {
                result.add_error(path, format!("should have at least {min} properties"));
            }
        }
        if let Some(max) = self.max_properties {
            if count > max {
                result.add_error(path, format!("should have at most {max} properties"));
            }
        }

        for (name, member) in members {
            let member_path = join_path(path, name);
            if let Some(validator) = self.properties.get(name) {
                result.merge(validator.validate_at(member, &member_path));
                continue;
            }
            match &self.additional {
                Some(AdditionalPolicy::Forbid) => {
                    result.add_error(&member_path, "is a forbidden property");
                }
                Some(AdditionalPolicy::Schema(validator)) => {
                    result.merge(validator.validate_at(member, &member_path));
                }
                Some(AdditionalPolicy::Allow) | None => {}
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oapi_spec::{Schema, SimpleType};
    use serde_json::json;

    fn typed(simple: SimpleType) -> SchemaValidator {
        SchemaValidator::new(&Schema::new().typed(simple, None).into_node()).unwrap()
    }

    fn pet_rule(additional: Option<AdditionalPolicy>) -> ObjectRule {
        ObjectRule {
            properties: BTreeMap::from([
                ("name".to_string(), typed(SimpleType::String)),
                ("age".to_string(), typed(SimpleType::Integer)),
                ("id".to_string(), typed(SimpleType::Integer)),
            ]),
            required: vec!["name".to_string(), "id".to_string()],
            additional,
            max_properties: None,
            min_properties: None,
        }
    }

    #[test]
    fn test_required_and_property_errors() {
        let result = pet_rule(None).validate(&json!({"age": "old", "extra": 1}), "pet");
        let found: Vec<(&str, &str)> = result
            .errors()
            .iter()
            .map(|v| (v.path.as_str(), v.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("pet.name", "is required"),
                ("pet.id", "is required"),
                ("pet.age", "must be of type integer, found string"),
            ]
        );
    }

    #[test]
    fn test_forbidden_additional_property() {
        let result = pet_rule(Some(AdditionalPolicy::Forbid))
            .validate(&json!({"name": "rex", "id": 1, "color": "red"}), "");
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].path, "color");
        assert_eq!(result.errors()[0].message, "is a forbidden property");
    }

    #[test]
    fn test_additional_schema_validates_extras() {
        let result = pet_rule(Some(AdditionalPolicy::Schema(typed(SimpleType::Boolean))))
            .validate(&json!({"name": "rex", "id": 1, "vaccinated": true, "chip": "x"}), "");
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].path, "chip");
    }

    #[test]
    fn test_property_count_bounds() {
        let rule = ObjectRule {
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional: None,
            max_properties: Some(1),
            min_properties: Some(1),
        };
        assert!(rule.validate(&json!({"a": 1}), "").is_valid());
        assert_eq!(
            rule.validate(&json!({}), "").errors()[0].message,
            "should have at least 1 properties"
        );
        assert_eq!(
            rule.validate(&json!({"a": 1, "b": 2}), "").errors()[0].message,
            "should have at most 1 properties"
        );
    }
}
