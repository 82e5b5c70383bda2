//! # Items
//!
//! A limited subset of a schema used by parameters that are not located in
//! the body, by response headers, and by nested array items of those.
//!
//! ## Wire Form
//!
//! An items node flattens three sub-groups into one object:
//!
//! 1. reference info (`$ref`), handled by [`Refable`];
//! 2. simple-type info (`type`, `format`, `items`, `collectionFormat`,
//!    `default`);
//! 3. validation constraints ([`CommonValidations`]).
//!
//! Vendor extensions ride along as a fourth group.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    Extensions, FlatObject, RawObject,
};
use crate::reference::Refable;
use crate::schema::{CommonValidations, Schema, SchemaItems, SchemaProps, SimpleType};

/// Items that are either a `$ref` or inline.
pub type ItemsNode = Refable<Items>;

/// Serialization of an array in a single textual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated.
    Csv,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated.
    Pipes,
    /// One value per repeated parameter instance.
    Multi,
}

impl CollectionFormat {
    /// Wire name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ssv => "ssv",
            Self::Tsv => "tsv",
            Self::Pipes => "pipes",
            Self::Multi => "multi",
        }
    }

    /// Split one raw textual value into its elements.
    ///
    /// `multi` values arrive as separate parameter instances, so the input
    /// is returned as a single element. An empty input yields no elements.
    pub fn split(&self, raw: &str) -> Vec<String> {
        if raw.is_empty() {
            return Vec::new();
        }
        let separator = match self {
            Self::Csv => ',',
            Self::Ssv => ' ',
            Self::Tsv => '\t',
            Self::Pipes => '|',
            Self::Multi => return vec![raw.to_string()],
        };
        raw.split(separator).map(str::to_string).collect()
    }
}

impl fmt::Display for CollectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simple-type sub-group shared by items, parameters, and headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub simple_type: Option<SimpleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ItemsNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl SimpleSchema {
    /// The format if set, else the type name.
    pub fn type_name(&self) -> &str {
        match (&self.format, &self.simple_type) {
            (Some(format), _) => format,
            (None, Some(simple_type)) => simple_type.as_str(),
            (None, None) => "",
        }
    }

    /// Type name of the nested items, or `""` when there are none.
    pub fn items_type_name(&self) -> &str {
        match self.items.as_deref() {
            Some(Refable::Inline(items)) => items.simple.type_name(),
            _ => "",
        }
    }
}

/// Inline items body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Items {
    /// Type and structure.
    pub simple: SimpleSchema,
    /// Value constraints.
    pub validations: CommonValidations,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl FlatObject for Items {
    fn encode_flat(&self) -> Result<RawObject, SpecError> {
        concat_groups([
            encode_group(&self.simple)?,
            encode_group(&self.validations)?,
            encode_extensions(&self.extensions),
        ])
    }

    fn decode_flat(raw: &RawObject) -> Result<Self, SpecError> {
        Ok(Self {
            simple: decode_group(raw)?,
            validations: decode_group(raw)?,
            extensions: extract_extensions(raw),
        })
    }
}

flat_serde!(Items);

impl Items {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an inline node.
    pub fn into_node(self) -> ItemsNode {
        Refable::Inline(self)
    }

    /// The format if set, else the type name.
    pub fn type_name(&self) -> &str {
        self.simple.type_name()
    }

    /// Set the type and format.
    pub fn typed(mut self, simple_type: SimpleType, format: Option<&str>) -> Self {
        self.simple.simple_type = Some(simple_type);
        self.simple.format = format.map(str::to_string);
        self
    }

    /// Make this an array of `items` serialized with `format`.
    pub fn collection_of(mut self, items: Items, format: CollectionFormat) -> Self {
        self.simple.simple_type = Some(SimpleType::Array);
        self.simple.items = Some(Box::new(items.into_node()));
        self.simple.collection_format = Some(format);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.simple.default = Some(value);
        self
    }

    pub fn with_max_length(mut self, max: u64) -> Self {
        self.validations.max_length = Some(max);
        self
    }

    pub fn with_min_length(mut self, min: u64) -> Self {
        self.validations.min_length = Some(min);
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.validations.pattern = Some(pattern.to_string());
        self
    }

    pub fn with_multiple_of(mut self, factor: f64) -> Self {
        self.validations.multiple_of = Some(factor);
        self
    }

    pub fn with_maximum(mut self, max: f64, exclusive: bool) -> Self {
        self.validations.maximum = Some(max);
        self.validations.exclusive_maximum = exclusive;
        self
    }

    pub fn with_minimum(mut self, min: f64, exclusive: bool) -> Self {
        self.validations.minimum = Some(min);
        self.validations.exclusive_minimum = exclusive;
        self
    }

    /// Replace the allowed values.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.validations.enum_values = values.into_iter().collect();
        self
    }

    pub fn with_max_items(mut self, size: u64) -> Self {
        self.validations.max_items = Some(size);
        self
    }

    pub fn with_min_items(mut self, size: u64) -> Self {
        self.validations.min_items = Some(size);
        self
    }

    /// Elements of this array must be unique.
    pub fn unique_values(mut self) -> Self {
        self.validations.unique_items = true;
        self
    }

    /// Elements of this array may repeat.
    pub fn allow_duplicates(mut self) -> Self {
        self.validations.unique_items = false;
        self
    }

    /// The equivalent schema, used when validating non-body values.
    pub fn to_schema(&self) -> Schema {
        simple_to_schema(&self.simple, &self.validations)
    }
}

/// Lift a simple schema and its validations into a full schema.
pub(crate) fn simple_to_schema(simple: &SimpleSchema, validations: &CommonValidations) -> Schema {
    let items = simple.items.as_deref().map(|node| {
        let nested = match node {
            Refable::Inline(items) => items.to_schema().into_node(),
            Refable::Reference(reference) => Refable::Reference(reference.clone()),
        };
        SchemaItems::Single(Box::new(nested))
    });
    Schema {
        props: SchemaProps {
            schema_type: simple.simple_type,
            format: simple.format.clone(),
            default: simple.default.clone(),
            items,
            ..SchemaProps::default()
        },
        validations: validations.clone(),
        extensions: Extensions::new(),
    }
}
