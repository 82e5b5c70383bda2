//! # Operations and Paths
//!
//! An operation is one verb + path endpoint, identified by a
//! document-unique `operationId`. Content types and security left empty or
//! absent on an operation are inherited from the document; see
//! [`Document::consumes_for`](crate::Document::consumes_for).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    is_extension_key, Extensions, FlatObject, RawObject,
};
use crate::parameter::ParameterNode;
use crate::responses::Responses;
use crate::security::SecurityRequirement;

/// HTTP method an operation is bound to, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl Method {
    /// All methods in iteration order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Members owned by the operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationProps {
    #[serde(rename = "operationId", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Accepted request content types; empty inherits the document default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Produced response content types; empty inherits the document default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterNode>,
    #[serde(default, skip_serializing_if = "Responses::is_empty")]
    pub responses: Responses,
    /// `None` inherits document security; `Some(vec![])` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub props: OperationProps,
    pub extensions: Extensions,
}

impl FlatObject for Operation {
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

flat_serde!(Operation);

impl Operation {
    pub fn new(id: &str) -> Self {
        Self {
            props: OperationProps {
                id: id.to_string(),
                ..OperationProps::default()
            },
            extensions: Extensions::new(),
        }
    }

    /// The operation id.
    pub fn id(&self) -> &str {
        &self.props.id
    }

    pub fn with_consumes(mut self, media_types: &[&str]) -> Self {
        self.props.consumes = media_types.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_produces(mut self, media_types: &[&str]) -> Self {
        self.props.produces = media_types.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Append a requirement set naming `schemes` with no scopes.
    pub fn with_security(mut self, schemes: &[&str]) -> Self {
        let requirement = schemes
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        self.props
            .security
            .get_or_insert_with(Vec::new)
            .push(requirement);
        self
    }
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItemProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// Parameters shared by every operation on the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub props: PathItemProps,
    pub extensions: Extensions,
}

impl FlatObject for PathItem {
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

flat_serde!(PathItem);

impl PathItem {
    /// The operation bound to `method`, if any.
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.props.get.as_ref(),
            Method::Put => self.props.put.as_ref(),
            Method::Post => self.props.post.as_ref(),
            Method::Delete => self.props.delete.as_ref(),
            Method::Options => self.props.options.as_ref(),
            Method::Head => self.props.head.as_ref(),
            Method::Patch => self.props.patch.as_ref(),
        }
    }

    /// Bind `operation` to `method`, replacing any previous one.
    pub fn set_operation(&mut self, method: Method, operation: Operation) {
        let slot = match method {
            Method::Get => &mut self.props.get,
            Method::Put => &mut self.props.put,
            Method::Post => &mut self.props.post,
            Method::Delete => &mut self.props.delete,
            Method::Options => &mut self.props.options,
            Method::Head => &mut self.props.head,
            Method::Patch => &mut self.props.patch,
        };
        *slot = Some(operation);
    }

    /// Declared operations in [`Method::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> + '_ {
        Method::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

/// Path template → path item. Members not starting with `/` are either
/// vendor extensions or ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    pub paths: BTreeMap<String, PathItem>,
    pub extensions: Extensions,
}

impl Paths {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.extensions.is_empty()
    }
}

impl Serialize for Paths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut paths = RawObject::new();
        for (path, item) in &self.paths {
            paths.insert(
                path.clone(),
                serde_json::to_value(item).map_err(serde::ser::Error::custom)?,
            );
        }
        let flat = concat_groups([paths, encode_extensions(&self.extensions)])
            .map_err(serde::ser::Error::custom)?;
        flat.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawObject::deserialize(deserializer)?;
        let mut paths = Self::default();
        for (key, value) in raw {
            if key.starts_with('/') {
                let item = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                paths.paths.insert(key, item);
            } else if is_extension_key(&key) {
                paths.extensions.insert(key, value);
            }
        }
        Ok(paths)
    }
}
