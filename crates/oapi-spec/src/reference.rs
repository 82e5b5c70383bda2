//! # References
//!
//! A node is either a reference (`$ref`) to another node or an inline
//! body, never both. [`Refable`] makes that exclusivity a type-level fact
//! instead of a convention over overlapping optional fields.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::SpecError;
use crate::flatten::{is_extension_key, RawObject};

/// Prefix of local definition references.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Member name carrying a reference URI.
pub const REF_KEY: &str = "$ref";

/// A `$ref` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The reference target, e.g. `#/definitions/Pet`.
    #[serde(rename = "$ref")]
    pub uri: String,
}

impl Reference {
    /// Create a reference to an arbitrary URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Create a reference to a local definition.
    pub fn definition(name: &str) -> Self {
        Self::new(format!("{DEFINITIONS_PREFIX}{name}"))
    }

    /// The definition name if this is a local `#/definitions/` reference.
    pub fn definition_name(&self) -> Option<&str> {
        self.uri.strip_prefix(DEFINITIONS_PREFIX)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Either a reference to a node or the node itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Refable<T> {
    /// Alias to another node.
    Reference(Reference),
    /// Inline body.
    Inline(T),
}

impl<T> Refable<T> {
    /// Returns the inline body, if any.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            Self::Inline(body) => Some(body),
            Self::Reference(_) => None,
        }
    }

    /// Returns the reference, if any.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Inline(_) => None,
        }
    }
}

impl<T> From<Reference> for Refable<T> {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl<T: DeserializeOwned> Refable<T> {
    /// Decode from a raw object.
    ///
    /// A `$ref` member makes the node a reference; vendor extensions may sit
    /// next to it, any other member is rejected.
    pub fn decode_raw(raw: RawObject) -> Result<Self, SpecError> {
        match raw.get(REF_KEY) {
            Some(Value::String(uri)) => {
                if let Some(field) = raw
                    .keys()
                    .find(|key| key.as_str() != REF_KEY && !is_extension_key(key))
                {
                    return Err(SpecError::MixedReference {
                        reference: uri.clone(),
                        field: field.clone(),
                    });
                }
                Ok(Self::Reference(Reference::new(uri.clone())))
            }
            Some(other) => Err(SpecError::InvalidReference(other.to_string())),
            None => Ok(Self::Inline(serde_json::from_value(Value::Object(raw))?)),
        }
    }
}

impl<T: Serialize> Serialize for Refable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reference(reference) => reference.serialize(serializer),
            Self::Inline(body) => body.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Refable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawObject::deserialize(deserializer)?;
        Self::decode_raw(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Body {
        name: String,
    }

    #[test]
    fn test_decode_reference() {
        let node: Refable<Body> = serde_json::from_value(json!({"$ref": "#/definitions/Pet"})).unwrap();
        let reference = node.as_reference().unwrap();
        assert_eq!(reference.definition_name(), Some("Pet"));
    }

    #[test]
    fn test_decode_inline() {
        let node: Refable<Body> = serde_json::from_value(json!({"name": "rex"})).unwrap();
        assert_eq!(node.as_inline().unwrap().name, "rex");
    }

    #[test]
    fn test_reference_with_inline_field_rejected() {
        let err = serde_json::from_value::<Refable<Body>>(json!({
            "$ref": "#/definitions/Pet",
            "name": "rex"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("inline field 'name'"), "{err}");
    }

    #[test]
    fn test_reference_tolerates_extensions() {
        let node: Refable<Body> =
            serde_json::from_value(json!({"$ref": "#/responses/error", "x-note": 1})).unwrap();
        assert_eq!(node.as_reference().unwrap().uri, "#/responses/error");
    }

    #[test]
    fn test_non_string_reference_rejected() {
        assert!(serde_json::from_value::<Refable<Body>>(json!({"$ref": 5})).is_err());
    }

    #[test]
    fn test_reference_serializes_as_ref_member() {
        let node: Refable<Body> = Reference::definition("Pet").into();
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({"$ref": "#/definitions/Pet"}));
    }

    #[test]
    fn test_non_local_reference_has_no_definition_name() {
        assert_eq!(Reference::new("other.json#/Pet").definition_name(), None);
    }
}
