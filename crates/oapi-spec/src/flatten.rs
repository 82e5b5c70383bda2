//! # Flattened Sub-Group Serialization
//!
//! Compound nodes are factored into named sub-groups (for example an
//! `Items` node is simple-type info + validation constraints + vendor
//! extensions). Each group encodes independently; the resulting objects
//! are concatenated into one flat wire object. Decoding runs every group's
//! decoder against the same raw object and assembles the node.
//!
//! ## Invariant
//!
//! Groups never share a member name. A collision during encoding is an
//! error, not a silent overwrite.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::value::ValueKind;

/// Vendor extensions (`x-*` members) preserved verbatim.
pub type Extensions = BTreeMap<String, Value>;

/// A raw wire object.
pub type RawObject = Map<String, Value>;

/// Returns true for member names that denote a vendor extension.
pub fn is_extension_key(key: &str) -> bool {
    key.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
}

/// Encode one sub-group into a raw object.
///
/// A group that encodes to `null` contributes no members.
pub fn encode_group<T: Serialize>(group: &T) -> Result<RawObject, SpecError> {
    match serde_json::to_value(group)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(RawObject::new()),
        other => Err(SpecError::NotAnObject(ValueKind::of(&other).as_str())),
    }
}

/// Decode one sub-group from the shared raw object.
///
/// Members that belong to other groups are ignored by the group's decoder.
pub fn decode_group<T: DeserializeOwned>(raw: &RawObject) -> Result<T, SpecError> {
    Ok(serde_json::from_value(Value::Object(raw.clone()))?)
}

/// Concatenate independently encoded groups into one object.
pub fn concat_groups(
    groups: impl IntoIterator<Item = RawObject>,
) -> Result<RawObject, SpecError> {
    let mut out = RawObject::new();
    for group in groups {
        for (key, value) in group {
            if out.contains_key(&key) {
                return Err(SpecError::FieldCollision(key));
            }
            out.insert(key, value);
        }
    }
    Ok(out)
}

/// Collect the vendor extensions present in a raw object.
pub fn extract_extensions(raw: &RawObject) -> Extensions {
    raw.iter()
        .filter(|(key, _)| is_extension_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Encode vendor extensions as their own group.
pub fn encode_extensions(extensions: &Extensions) -> RawObject {
    extensions
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// A node whose wire form is a flat object assembled from sub-groups.
pub trait FlatObject: Sized {
    /// Encode every sub-group and flatten them into one object.
    fn encode_flat(&self) -> Result<RawObject, SpecError>;

    /// Decode every sub-group from the same raw object.
    fn decode_flat(raw: &RawObject) -> Result<Self, SpecError>;
}

/// Implement `Serialize`/`Deserialize` for a [`FlatObject`].
macro_rules! flat_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let flat = $crate::flatten::FlatObject::encode_flat(self)
                    .map_err(serde::ser::Error::custom)?;
                serde::Serialize::serialize(&flat, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <$crate::flatten::RawObject as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::flatten::FlatObject>::decode_flat(&raw)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use flat_serde;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> RawObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_extension_key_detection() {
        assert!(is_extension_key("x-go-name"));
        assert!(is_extension_key("X-Internal"));
        assert!(!is_extension_key("x"));
        assert!(!is_extension_key("maximum"));
        assert!(!is_extension_key("é-x"));
    }

    #[test]
    fn test_concat_groups_merges_disjoint_members() {
        let merged = concat_groups([
            object(json!({"type": "string"})),
            object(json!({"maxLength": 3})),
        ])
        .unwrap();
        assert_eq!(Value::Object(merged), json!({"type": "string", "maxLength": 3}));
    }

    #[test]
    fn test_concat_groups_rejects_collision() {
        let err = concat_groups([object(json!({"a": 1})), object(json!({"a": 2}))]).unwrap_err();
        assert!(matches!(err, SpecError::FieldCollision(ref f) if f == "a"));
    }

    #[test]
    fn test_encode_group_rejects_scalars() {
        let err = encode_group(&3).unwrap_err();
        assert!(matches!(err, SpecError::NotAnObject("number")));
    }

    #[test]
    fn test_extract_extensions_only_keeps_x_members() {
        let raw = object(json!({"x-a": 1, "type": "string", "x-b": {"c": true}}));
        let ext = extract_extensions(&raw);
        assert_eq!(ext.len(), 2);
        assert_eq!(ext["x-b"], json!({"c": true}));
    }
}
