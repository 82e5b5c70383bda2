//! # Responses
//!
//! The responses container maps HTTP status codes to expected responses,
//! plus one `default` response for every code not covered individually.
//!
//! ## Wire Form
//!
//! A single flat object whose members are the literal `default`, decimal
//! status-code strings, or `x-` vendor extensions. Any other member is
//! ignored so newer documents still decode.
//!
//! A malformed `default` or status-code entry does not fail the decode: the
//! code map is dropped as a whole and only the vendor extensions survive.
//! A payload that is not an object at all is an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    Extensions, FlatObject, RawObject,
};
use crate::items::Items;
use crate::reference::Refable;
use crate::schema::SchemaNode;

/// Member name of the fallback response.
pub const DEFAULT_KEY: &str = "default";

/// A response that is either a `$ref` or inline.
pub type ResponseNode = Refable<Response>;

/// Members owned by the response itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseProps {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Items>,
    /// Example payloads keyed by media type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, Value>,
}

/// One expected response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub props: ResponseProps,
    pub extensions: Extensions,
}

impl FlatObject for Response {
    fn encode_flat(&self) -> Result<RawObject, SpecError> {
        concat_groups([encode_group(&self.props)?, encode_extensions(&self.extensions)])
    }

    fn decode_flat(raw: &RawObject) -> Result<Self, SpecError> {
        Ok(Self {
            props: decode_group(raw)?,
            extensions: extract_extensions(raw),
        })
    }
}

flat_serde!(Response);

impl Response {
    pub fn new(description: &str) -> Self {
        Self {
            props: ResponseProps {
                description: description.to_string(),
                ..ResponseProps::default()
            },
            extensions: Extensions::new(),
        }
    }

    pub fn with_schema(mut self, schema: SchemaNode) -> Self {
        self.props.schema = Some(schema);
        self
    }

    pub fn into_node(self) -> ResponseNode {
        Refable::Inline(self)
    }
}

/// Expected responses of an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    /// Fallback for codes not listed in `status_codes`.
    pub default: Option<ResponseNode>,
    pub status_codes: BTreeMap<u16, ResponseNode>,
    pub extensions: Extensions,
}

impl Responses {
    /// The response declared for `code`, falling back to `default`.
    pub fn for_status(&self, code: u16) -> Option<&ResponseNode> {
        self.status_codes.get(&code).or(self.default.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.status_codes.is_empty() && self.extensions.is_empty()
    }

    fn encode_codes(&self) -> Result<RawObject, SpecError> {
        let mut out = RawObject::new();
        if let Some(default) = &self.default {
            out.insert(DEFAULT_KEY.to_string(), serde_json::to_value(default)?);
        }
        for (code, response) in &self.status_codes {
            out.insert(code.to_string(), serde_json::to_value(response)?);
        }
        Ok(out)
    }

    fn decode_codes(
        raw: &RawObject,
    ) -> Result<(Option<ResponseNode>, BTreeMap<u16, ResponseNode>), SpecError> {
        let mut default = None;
        let mut status_codes = BTreeMap::new();
        for (key, value) in raw {
            if key == DEFAULT_KEY {
                default = Some(serde_json::from_value(value.clone())?);
            } else if let Ok(code) = key.parse::<u16>() {
                status_codes.insert(code, serde_json::from_value(value.clone())?);
            }
        }
        Ok((default, status_codes))
    }
}

impl Serialize for Responses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flat = self
            .encode_codes()
            .and_then(|codes| concat_groups([codes, encode_extensions(&self.extensions)]))
            .map_err(serde::ser::Error::custom)?;
        flat.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawObject::deserialize(deserializer)?;
        let extensions = extract_extensions(&raw);
        // A bad entry empties the code map instead of failing the decode.
        let (default, status_codes) = Self::decode_codes(&raw).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "discarding malformed responses entries");
            (None, BTreeMap::new())
        });
        Ok(Self {
            default,
            status_codes,
            extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_splits_default_codes_and_extensions() {
        let responses: Responses = serde_json::from_value(json!({
            "default": {"$ref": "#/responses/genericError"},
            "200": {"description": "ok", "schema": {"type": "string"}},
            "422": {"$ref": "#/responses/validationError"},
            "x-rate-limited": true
        }))
        .unwrap();
        assert_eq!(
            responses.default.as_ref().unwrap().as_reference().unwrap().uri,
            "#/responses/genericError"
        );
        assert_eq!(responses.status_codes.len(), 2);
        assert_eq!(
            responses.status_codes[&200].as_inline().unwrap().props.description,
            "ok"
        );
        assert_eq!(responses.extensions["x-rate-limited"], json!(true));
    }

    #[test]
    fn test_unknown_keys_silently_ignored() {
        let responses: Responses = serde_json::from_value(json!({
            "2XX": {"description": "range"},
            "ok": {"description": "nope"},
            "204": {"description": "empty"}
        }))
        .unwrap();
        assert_eq!(responses.status_codes.keys().copied().collect::<Vec<_>>(), vec![204]);
        assert!(responses.default.is_none());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let result = serde_json::from_value::<Responses>(json!(["not", "a", "map"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_entry_empties_codes_but_keeps_extensions() {
        let responses: Responses = serde_json::from_value(json!({
            "default": {"description": "fallback"},
            "200": {"description": 5},
            "x-a": 1
        }))
        .unwrap();
        assert!(responses.default.is_none());
        assert!(responses.status_codes.is_empty());
        assert_eq!(responses.extensions["x-a"], json!(1));
    }

    #[test]
    fn test_malformed_responses_inside_operation_decode_quietly() {
        let op: crate::operation::Operation = serde_json::from_value(json!({
            "operationId": "list",
            "responses": {"200": {"schema": {"$ref": "#/definitions/Pet", "type": "object"}}}
        }))
        .unwrap();
        assert!(op.props.responses.status_codes.is_empty());
    }

    #[test]
    fn test_encode_is_flat() {
        let mut responses = Responses {
            default: Some(Response::new("error").into_node()),
            ..Responses::default()
        };
        responses.status_codes.insert(201, Response::new("created").into_node());
        responses.extensions.insert("x-owner".into(), json!("pets"));
        let encoded = serde_json::to_value(&responses).unwrap();
        assert_eq!(
            encoded,
            json!({
                "default": {"description": "error"},
                "201": {"description": "created"},
                "x-owner": "pets"
            })
        );
    }

    #[test]
    fn test_for_status_falls_back_to_default() {
        let mut responses = Responses {
            default: Some(Response::new("fallback").into_node()),
            ..Responses::default()
        };
        responses.status_codes.insert(200, Response::new("ok").into_node());
        let ok = responses.for_status(200).unwrap().as_inline().unwrap();
        assert_eq!(ok.props.description, "ok");
        let other = responses.for_status(500).unwrap().as_inline().unwrap();
        assert_eq!(other.props.description, "fallback");
    }

    #[test]
    fn test_response_headers_and_extensions() {
        let response: Response = serde_json::from_value(json!({
            "description": "paged",
            "headers": {"X-Total": {"type": "integer", "minimum": 0}},
            "x-cache": "none"
        }))
        .unwrap();
        assert_eq!(response.props.headers["X-Total"].validations.minimum, Some(0.0));
        assert_eq!(response.extensions["x-cache"], json!("none"));
    }
}
