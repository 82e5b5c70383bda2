//! # Parameters
//!
//! Body parameters carry a full schema; every other location carries the
//! items-style simple schema plus common validations, flattened into the
//! same object as the parameter's own members.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    Extensions, FlatObject, RawObject,
};
use crate::items::{simple_to_schema, SimpleSchema};
use crate::reference::Refable;
use crate::schema::{CommonValidations, Schema, SchemaNode};

/// A parameter that is either a `$ref` or inline.
pub type ParameterNode = Refable<Parameter>;

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    FormData,
    Body,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::FormData => "formData",
            Self::Body => "body",
        })
    }
}

/// Members owned by the parameter itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamProps {
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Body schema; only meaningful when `in` is `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// An operation or path-level parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub props: ParamProps,
    pub simple: SimpleSchema,
    pub validations: CommonValidations,
    pub extensions: Extensions,
}

impl FlatObject for Parameter {
    fn encode_flat(&self) -> Result<RawObject, SpecError> {
        concat_groups([
            encode_group(&self.props)?,
            encode_group(&self.simple)?,
            encode_group(&self.validations)?,
            encode_extensions(&self.extensions),
        ])
    }

    fn decode_flat(raw: &RawObject) -> Result<Self, SpecError> {
        Ok(Self {
            props: decode_group(raw)?,
            simple: decode_group(raw)?,
            validations: decode_group(raw)?,
            extensions: extract_extensions(raw),
        })
    }
}

flat_serde!(Parameter);

impl Parameter {
    /// A body parameter validated against `schema`.
    pub fn body(name: &str, schema: SchemaNode) -> Self {
        Self {
            props: ParamProps {
                name: name.to_string(),
                location: Some(ParameterLocation::Body),
                required: true,
                schema: Some(schema),
                ..ParamProps::default()
            },
            ..Self::default()
        }
    }

    /// A non-body parameter with the given location.
    pub fn simple(name: &str, location: ParameterLocation, simple: SimpleSchema) -> Self {
        Self {
            props: ParamProps {
                name: name.to_string(),
                location: Some(location),
                ..ParamProps::default()
            },
            simple,
            ..Self::default()
        }
    }

    pub fn is_body(&self) -> bool {
        self.props.location == Some(ParameterLocation::Body)
    }

    /// The schema a value for this parameter is validated against.
    ///
    /// Body parameters use their declared schema; everything else is lifted
    /// from the simple schema and validations.
    pub fn value_schema(&self) -> SchemaNode {
        match (&self.props.schema, self.is_body()) {
            (Some(schema), true) => schema.clone(),
            _ => simple_to_schema(&self.simple, &self.validations).into_node(),
        }
    }

    /// Equivalent schema for a non-body parameter.
    pub fn to_schema(&self) -> Schema {
        simple_to_schema(&self.simple, &self.validations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SimpleType;
    use serde_json::json;

    #[test]
    fn test_decode_query_parameter() {
        let param: Parameter = serde_json::from_value(json!({
            "in": "query",
            "name": "limit",
            "type": "integer",
            "format": "int32",
            "maximum": 50,
            "x-go-name": "Limit"
        }))
        .unwrap();
        assert_eq!(param.props.location, Some(ParameterLocation::Query));
        assert_eq!(param.simple.type_name(), "int32");
        assert_eq!(param.validations.maximum, Some(50.0));
        assert_eq!(param.extensions["x-go-name"], json!("Limit"));
        assert!(!param.is_body());
    }

    #[test]
    fn test_location_is_optional() {
        let param: Parameter =
            serde_json::from_value(json!({"name": "skip", "type": "integer"})).unwrap();
        assert_eq!(param.props.location, None);
    }

    #[test]
    fn test_body_parameter_uses_declared_schema() {
        let param = Parameter::body("pet", crate::schema::Schema::reference("Pet"));
        let encoded = serde_json::to_value(&param).unwrap();
        assert_eq!(
            encoded,
            json!({"name": "pet", "in": "body", "required": true, "schema": {"$ref": "#/definitions/Pet"}})
        );
        assert!(param.value_schema().as_reference().is_some());
    }

    #[test]
    fn test_simple_parameter_lifts_to_schema() {
        let mut param = Parameter::simple(
            "tag",
            ParameterLocation::Header,
            SimpleSchema {
                simple_type: Some(SimpleType::String),
                ..SimpleSchema::default()
            },
        );
        param.validations.max_length = Some(8);
        let node = param.value_schema();
        let schema = node.as_inline().unwrap();
        assert_eq!(schema.props.schema_type, Some(SimpleType::String));
        assert_eq!(schema.validations.max_length, Some(8));
    }

    #[test]
    fn test_location_display() {
        assert_eq!(ParameterLocation::FormData.to_string(), "formData");
    }
}
