//! # Schema Validator
//!
//! Compiles a schema node once into the set of rules its populated fields
//! call for, then validates any number of values against that set.
//!
//! ## Construction
//!
//! Local `#/definitions/<name>` references are resolved while compiling, so
//! a validator never consults the document again. Configuration problems
//! (an unresolvable reference, an unparsable pattern, a non-positive
//! `multipleOf`) surface from the constructor as [`ConfigError`].
//!
//! The tree is assumed to be acyclic. A reference cycle recurses without
//! bound.
//!
//! ## Thread Safety
//!
//! `SchemaValidator` is `Send + Sync` and immutable after construction, so
//! one instance can validate independent values from many threads.

use std::collections::BTreeMap;

use oapi_spec::{
    Additional, Document, Items, Parameter, Refable, Schema, SchemaItems, SchemaNode, SimpleType,
    ValueKind,
};
use regex::Regex;
use serde_json::Value;

use crate::error::ConfigError;
use crate::options::ValidatorOptions;
use crate::result::ValidationResult;
use crate::rules::{
    AdditionalPolicy, ArrayRule, Bound, EnumRule, FormatRule, ItemsPolicy, KnownFormat,
    NumericRule, ObjectRule, Rule, TextRule, TypeRule,
};

/// A compiled schema.
#[derive(Debug)]
pub struct SchemaValidator {
    rules: Vec<Box<dyn Rule>>,
}

impl SchemaValidator {
    /// Compile a self-contained node with default options.
    ///
    /// # Errors
    ///
    /// Any `$ref` in the node yields [`ConfigError::UnresolvedReference`];
    /// use [`SchemaValidator::with_options`] with a document to resolve them.
    pub fn new(node: &SchemaNode) -> Result<Self, ConfigError> {
        Self::with_options(node, None, &ValidatorOptions::default())
    }

    /// Compile `node`, resolving references against `document`.
    pub fn with_options(
        node: &SchemaNode,
        document: Option<&Document>,
        options: &ValidatorOptions,
    ) -> Result<Self, ConfigError> {
        let validator = Compiler { document, options }.node(node)?;
        tracing::debug!(rules = ?validator.rule_names(), "compiled schema validator");
        Ok(validator)
    }

    /// Compile the named entry of the document's `definitions`.
    pub fn for_definition(
        document: &Document,
        name: &str,
        options: &ValidatorOptions,
    ) -> Result<Self, ConfigError> {
        let node = document
            .definition(name)
            .ok_or_else(|| ConfigError::UnknownDefinition(name.to_string()))?;
        Self::with_options(node, Some(document), options)
    }

    /// Compile a non-body items or header shape.
    pub fn for_items(
        items: &Items,
        document: Option<&Document>,
        options: &ValidatorOptions,
    ) -> Result<Self, ConfigError> {
        Self::with_options(&items.to_schema().into_node(), document, options)
    }

    /// Compile the schema a value for `parameter` must satisfy.
    pub fn for_parameter(
        parameter: &Parameter,
        document: Option<&Document>,
        options: &ValidatorOptions,
    ) -> Result<Self, ConfigError> {
        Self::with_options(&parameter.value_schema(), document, options)
    }

    /// Validate `value` as the root of a payload.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        self.validate_at(value, "")
    }

    /// Validate `value`, reporting violations relative to `path`.
    ///
    /// Every rule that applies to the value's shape runs; nothing short-circuits.
    pub fn validate_at(&self, value: &Value, path: &str) -> ValidationResult {
        let kind = ValueKind::of(value);
        let mut result = ValidationResult::new();
        for rule in self.rules.iter().filter(|rule| rule.applies(kind)) {
            result.merge(rule.validate(value, path));
        }
        result
    }

    /// Names of the rules selected at compile time, in run order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

struct Compiler<'a> {
    document: Option<&'a Document>,
    options: &'a ValidatorOptions,
}

impl Compiler<'_> {
    fn node(&self, node: &SchemaNode) -> Result<SchemaValidator, ConfigError> {
        match node {
            Refable::Inline(schema) => self.schema(schema),
            Refable::Reference(reference) => {
                let target = self
                    .document
                    .and_then(|document| document.resolve_schema(reference))
                    .ok_or_else(|| ConfigError::UnresolvedReference(reference.uri.clone()))?;
                self.node(target)
            }
        }
    }

    fn schema(&self, schema: &Schema) -> Result<SchemaValidator, ConfigError> {
        let props = &schema.props;
        let checks = &schema.validations;
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        match props.schema_type {
            Some(SimpleType::File) | None => {}
            Some(expected) => rules.push(Box::new(TypeRule { expected })),
        }

        if self.options.validate_formats {
            if let Some(format) = props.format.as_deref().and_then(KnownFormat::parse) {
                rules.push(Box::new(FormatRule::new(format)?));
            }
        }

        if checks.has_numeric() {
            if let Some(factor) = checks.multiple_of {
                if factor <= 0.0 || !factor.is_finite() {
                    return Err(ConfigError::InvalidMultipleOf(factor));
                }
            }
            rules.push(Box::new(NumericRule {
                maximum: checks.maximum.map(|limit| Bound {
                    limit,
                    exclusive: checks.exclusive_maximum,
                }),
                minimum: checks.minimum.map(|limit| Bound {
                    limit,
                    exclusive: checks.exclusive_minimum,
                }),
                multiple_of: checks.multiple_of,
                tolerance: self.options.multiple_of_tolerance,
            }));
        }

        if checks.has_text() {
            let pattern = checks
                .pattern
                .as_deref()
                .map(|pattern| {
                    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
                })
                .transpose()?;
            rules.push(Box::new(TextRule {
                max_length: checks.max_length,
                min_length: checks.min_length,
                pattern,
            }));
        }

        if !checks.enum_values.is_empty() {
            rules.push(Box::new(EnumRule {
                values: checks.enum_values.clone(),
            }));
        }

        if props.items.is_some() || checks.has_sequence() {
            let (items, additional) = match &props.items {
                Some(SchemaItems::Single(node)) => (Some(ItemsPolicy::Single(self.node(node)?)), None),
                Some(SchemaItems::Tuple(nodes)) => {
                    let tuple = nodes
                        .iter()
                        .map(|node| self.node(node))
                        .collect::<Result<Vec<_>, _>>()?;
                    let additional = props
                        .additional_items
                        .as_ref()
                        .map(|policy| self.additional(policy))
                        .transpose()?;
                    (Some(ItemsPolicy::Tuple(tuple)), additional)
                }
                None => (None, None),
            };
            rules.push(Box::new(ArrayRule {
                items,
                additional,
                max_items: checks.max_items,
                min_items: checks.min_items,
                unique: checks.unique_items,
            }));
        }

        if !props.properties.is_empty()
            || !props.required.is_empty()
            || props.additional_properties.is_some()
            || props.max_properties.is_some()
            || props.min_properties.is_some()
        {
            let properties = props
                .properties
                .iter()
                .map(|(name, node)| Ok((name.clone(), self.node(node)?)))
                .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
            let additional = props
                .additional_properties
                .as_ref()
                .map(|policy| self.additional(policy))
                .transpose()?;
            rules.push(Box::new(ObjectRule {
                properties,
                required: props.required.clone(),
                additional,
                max_properties: props.max_properties,
                min_properties: props.min_properties,
            }));
        }

        Ok(SchemaValidator { rules })
    }

    fn additional(&self, policy: &Additional) -> Result<AdditionalPolicy, ConfigError> {
        Ok(match policy {
            Additional::Forbid => AdditionalPolicy::Forbid,
            Additional::Allow => AdditionalPolicy::Allow,
            Additional::Schema(node) => AdditionalPolicy::Schema(self.node(node)?),
        })
    }
}
