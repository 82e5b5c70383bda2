//! # Schema Nodes
//!
//! A schema node is a (possibly recursive) constraint tree describing the
//! expected shape of a value. On the wire a schema is one flat object made
//! of three sub-groups: schema properties, common validations, and vendor
//! extensions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    Extensions, FlatObject, RawObject,
};
use crate::reference::{Reference, Refable};

/// A schema that is either a `$ref` or inline constraints.
pub type SchemaNode = Refable<Schema>;

/// Declared value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleType {
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Any number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Sequence.
    Array,
    /// Mapping.
    Object,
    /// Uploaded file (form data only).
    File,
    /// `null`.
    Null,
}

impl SimpleType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::File => "file",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Constraints shared by schemas, items, parameters, and headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonValidations {
    /// Upper numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Whether `maximum` itself is excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    /// Lower numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Whether `minimum` itself is excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Regular expression a string must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Allowed values.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
}

impl CommonValidations {
    /// Returns true when no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true when a numeric constraint is set.
    pub fn has_numeric(&self) -> bool {
        self.maximum.is_some() || self.minimum.is_some() || self.multiple_of.is_some()
    }

    /// Returns true when a string constraint is set.
    pub fn has_text(&self) -> bool {
        self.max_length.is_some() || self.min_length.is_some() || self.pattern.is_some()
    }

    /// Returns true when a sequence-level constraint is set.
    pub fn has_sequence(&self) -> bool {
        self.max_items.is_some() || self.min_items.is_some() || self.unique_items
    }
}

/// Array `items`: one shared schema or a positional tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaItems {
    /// Every element is validated against this schema.
    Single(Box<SchemaNode>),
    /// Element `i` is validated against schema `i`.
    Tuple(Vec<SchemaNode>),
}

impl Serialize for SchemaItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(node) => node.serialize(serializer),
            Self::Tuple(nodes) => nodes.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<SchemaNode>, _>>()
                .map(Self::Tuple)
                .map_err(D::Error::custom),
            Value::Object(raw) => SchemaNode::decode_raw(raw)
                .map(|node| Self::Single(Box::new(node)))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "items must be a schema or an array of schemas, found {other}"
            ))),
        }
    }
}

/// Policy for `additionalItems` and `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional {
    /// `false`: extras are rejected.
    Forbid,
    /// `true`: extras are accepted without validation.
    Allow,
    /// Extras are validated against this schema.
    Schema(Box<SchemaNode>),
}

impl Serialize for Additional {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Forbid => serializer.serialize_bool(false),
            Self::Allow => serializer.serialize_bool(true),
            Self::Schema(node) => node.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Additional {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(Self::Forbid),
            Value::Bool(true) => Ok(Self::Allow),
            Value::Object(raw) => SchemaNode::decode_raw(raw)
                .map(|node| Self::Schema(Box::new(node)))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a boolean or a schema, found {other}"
            ))),
        }
    }
}

/// Schema-only members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProps {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SimpleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<Additional>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Additional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
}

/// An inline schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Type, structure, and documentation members.
    pub props: SchemaProps,
    /// Value constraints.
    pub validations: CommonValidations,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl FlatObject for Schema {
    fn encode_flat(&self) -> Result<RawObject, SpecError> {
        concat_groups([
            encode_group(&self.props)?,
            encode_group(&self.validations)?,
            encode_extensions(&self.extensions),
        ])
    }

    fn decode_flat(raw: &RawObject) -> Result<Self, SpecError> {
        Ok(Self {
            props: decode_group(raw)?,
            validations: decode_group(raw)?,
            extensions: extract_extensions(raw),
        })
    }
}

flat_serde!(Schema);

impl Schema {
    /// An empty schema that accepts any value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this schema in an inline node.
    pub fn into_node(self) -> SchemaNode {
        Refable::Inline(self)
    }

    /// A reference node to a local definition.
    pub fn reference(name: &str) -> SchemaNode {
        Refable::Reference(Reference::definition(name))
    }

    /// The format if set, else the type name.
    pub fn type_name(&self) -> &str {
        match (&self.props.format, &self.props.schema_type) {
            (Some(format), _) => format,
            (None, Some(schema_type)) => schema_type.as_str(),
            (None, None) => "",
        }
    }

    pub fn typed(mut self, schema_type: SimpleType, format: Option<&str>) -> Self {
        self.props.schema_type = Some(schema_type);
        self.props.format = format.map(str::to_string);
        self
    }

    /// Make this an array whose elements all match `items`.
    pub fn items_of(mut self, items: SchemaNode) -> Self {
        self.props.schema_type = Some(SimpleType::Array);
        self.props.items = Some(SchemaItems::Single(Box::new(items)));
        self
    }

    /// Make this an array validated positionally against `items`.
    pub fn tuple_of(mut self, items: Vec<SchemaNode>) -> Self {
        self.props.schema_type = Some(SimpleType::Array);
        self.props.items = Some(SchemaItems::Tuple(items));
        self
    }

    pub fn with_additional_items(mut self, policy: Additional) -> Self {
        self.props.additional_items = Some(policy);
        self
    }

    pub fn with_property(mut self, name: &str, node: SchemaNode) -> Self {
        self.props.schema_type.get_or_insert(SimpleType::Object);
        self.props.properties.insert(name.to_string(), node);
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.props.required = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_additional_properties(mut self, policy: Additional) -> Self {
        self.props.additional_properties = Some(policy);
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

    pub fn unique_values(mut self) -> Self {
        self.validations.unique_items = true;
        self
    }

    pub fn allow_duplicates(mut self) -> Self {
        self.validations.unique_items = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_flat_schema() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "string",
            "format": "uuid",
            "maxLength": 36,
            "x-go-name": "ID"
        }))
        .unwrap();
        assert_eq!(schema.props.schema_type, Some(SimpleType::String));
        assert_eq!(schema.validations.max_length, Some(36));
        assert_eq!(schema.extensions["x-go-name"], json!("ID"));
        assert_eq!(schema.type_name(), "uuid");
    }

    #[test]
    fn test_unknown_non_extension_members_dropped() {
        let schema: Schema = serde_json::from_value(json!({"type": "integer", "bogus": 1})).unwrap();
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(encoded, json!({"type": "integer"}));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_value::<Schema>(json!({"type": "decimal"})).is_err());
    }

    #[test]
    fn test_items_single_and_tuple() {
        let single: Schema =
            serde_json::from_value(json!({"type": "array", "items": {"type": "string"}})).unwrap();
        assert!(matches!(single.props.items, Some(SchemaItems::Single(_))));

        let tuple: Schema = serde_json::from_value(json!({
            "type": "array",
            "items": [{"type": "string"}, {"$ref": "#/definitions/Pet"}],
            "additionalItems": false
        }))
        .unwrap();
        match &tuple.props.items {
            Some(SchemaItems::Tuple(nodes)) => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(nodes[1].as_reference().unwrap().definition_name(), Some("Pet"));
            }
            other => panic!("expected tuple items, got {other:?}"),
        }
        assert_eq!(tuple.props.additional_items, Some(Additional::Forbid));
    }

    #[test]
    fn test_additional_policies() {
        let allow: Additional = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(allow, Additional::Allow);
        let schema: Additional = serde_json::from_value(json!({"type": "boolean"})).unwrap();
        assert!(matches!(schema, Additional::Schema(_)));
        assert!(serde_json::from_value::<Additional>(json!(3)).is_err());
        assert_eq!(serde_json::to_value(Additional::Forbid).unwrap(), json!(false));
    }

    #[test]
    fn test_builder_round_trip() {
        let schema = Schema::new()
            .typed(SimpleType::Number, Some("double"))
            .with_maximum(10.0, true)
            .with_minimum(1.0, false)
            .with_multiple_of(0.5)
            .with_enum([json!(1.5), json!(2.0)]);
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(encoded["exclusiveMaximum"], json!(true));
        assert!(encoded.get("exclusiveMinimum").is_none());
        let decoded: Schema = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_nested_properties_round_trip() {
        let schema = Schema::new()
            .with_property("name", Schema::new().typed(SimpleType::String, None).into_node())
            .with_property("owner", Schema::reference("User"))
            .with_required(&["name"])
            .with_additional_properties(Additional::Forbid);
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(encoded["properties"]["owner"], json!({"$ref": "#/definitions/User"}));
        assert_eq!(encoded["additionalProperties"], json!(false));
        let decoded: Schema = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_validation_predicates() {
        let v = CommonValidations::default();
        assert!(v.is_empty());
        let schema = Schema::new().with_min_items(1).with_pattern("^a");
        assert!(schema.validations.has_sequence());
        assert!(schema.validations.has_text());
        assert!(!schema.validations.has_numeric());
    }
}
