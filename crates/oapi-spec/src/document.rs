//! # Document
//!
//! The root of a materialized spec tree. The document is immutable once
//! built; every accessor here is a pure read over already-loaded data.
//!
//! ## Inheritance
//!
//! Operations inherit `consumes`, `produces`, and `security` from the
//! document when they leave them unset. An empty content-type list means
//! "inherit", never "accept or produce nothing".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SpecError;
use crate::flatten::{
    concat_groups, decode_group, encode_extensions, encode_group, extract_extensions, flat_serde,
    Extensions, FlatObject, RawObject,
};
use crate::operation::{Method, Operation, PathItem, Paths};
use crate::parameter::{Parameter, ParameterNode};
use crate::reference::{Reference, Refable};
use crate::responses::{Response, ResponseNode};
use crate::schema::SchemaNode;
use crate::security::{SecurityRequirement, SecurityScheme};
use crate::yaml;

const PARAMETERS_PREFIX: &str = "#/parameters/";
const RESPONSES_PREFIX: &str = "#/responses/";

fn default_swagger() -> String {
    "2.0".to_string()
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Members owned by the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProps {
    #[serde(default = "default_swagger")]
    pub swagger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Default request content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Default response content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Paths::is_empty")]
    pub paths: Paths,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    /// Default security requirement sets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Default for DocumentProps {
    fn default() -> Self {
        Self {
            swagger: default_swagger(),
            info: None,
            host: None,
            base_path: None,
            schemes: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            paths: Paths::default(),
            definitions: BTreeMap::new(),
            parameters: BTreeMap::new(),
            responses: BTreeMap::new(),
            security_definitions: BTreeMap::new(),
            security: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// A fully resolved API document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub props: DocumentProps,
    pub extensions: Extensions,
}

impl FlatObject for Document {
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

flat_serde!(Document);

/// One operation together with where it is mounted.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub path: &'a str,
    pub method: Method,
    pub operation: &'a Operation,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a document from YAML (or JSON) text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SpecError> {
        Self::from_value(yaml::from_str(text)?)
    }

    /// Decode a document from a JSON value tree.
    pub fn from_value(value: Value) -> Result<Self, SpecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Content types `op` accepts: its own list, or the document default.
    pub fn consumes_for<'a>(&'a self, op: &'a Operation) -> &'a [String] {
        if op.props.consumes.is_empty() {
            &self.props.consumes
        } else {
            &op.props.consumes
        }
    }

    /// Content types `op` produces: its own list, or the document default.
    pub fn produces_for<'a>(&'a self, op: &'a Operation) -> &'a [String] {
        if op.props.produces.is_empty() {
            &self.props.produces
        } else {
            &op.props.produces
        }
    }

    /// Effective security requirement sets of `op`.
    pub fn security_for<'a>(&'a self, op: &'a Operation) -> &'a [SecurityRequirement] {
        match &op.props.security {
            Some(requirements) => requirements,
            None => &self.props.security,
        }
    }

    /// Definitions of every scheme referenced by `op`'s effective security.
    ///
    /// Referenced names missing from `securityDefinitions` are skipped; the
    /// contract registry is what reports them.
    pub fn security_definitions_for(&self, op: &Operation) -> BTreeMap<String, SecurityScheme> {
        self.security_for(op)
            .iter()
            .flat_map(|requirement| requirement.keys())
            .filter_map(|name| {
                self.props
                    .security_definitions
                    .get(name)
                    .map(|scheme| (name.clone(), scheme.clone()))
            })
            .collect()
    }

    /// Every path item keyed by path template.
    pub fn all_paths(&self) -> &BTreeMap<String, PathItem> {
        &self.props.paths.paths
    }

    /// Every operation, paths in sorted order and methods in [`Method::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = OperationRef<'_>> + '_ {
        self.all_paths().iter().flat_map(|(path, item)| {
            item.operations().map(move |(method, operation)| OperationRef {
                path: path.as_str(),
                method,
                operation,
            })
        })
    }

    /// Look up an operation by id.
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations()
            .map(|found| found.operation)
            .find(|op| op.id() == id)
    }

    /// A named entry of `definitions`.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.props.definitions.get(name)
    }

    /// Resolve a local `#/definitions/<name>` reference.
    pub fn resolve_schema(&self, reference: &Reference) -> Option<&SchemaNode> {
        reference
            .definition_name()
            .and_then(|name| self.definition(name))
    }

    /// Resolve a parameter node, following a local `#/parameters/` reference.
    pub fn resolve_parameter<'a>(&'a self, node: &'a ParameterNode) -> Option<&'a Parameter> {
        match node {
            Refable::Inline(parameter) => Some(parameter),
            Refable::Reference(reference) => reference
                .uri
                .strip_prefix(PARAMETERS_PREFIX)
                .and_then(|name| self.props.parameters.get(name)),
        }
    }

    /// Resolve a response node, following a local `#/responses/` reference.
    pub fn resolve_response<'a>(&'a self, node: &'a ResponseNode) -> Option<&'a Response> {
        match node {
            Refable::Inline(response) => Some(response),
            Refable::Reference(reference) => reference
                .uri
                .strip_prefix(RESPONSES_PREFIX)
                .and_then(|name| self.props.responses.get(name)),
        }
    }

    /// Bind `operation` to `method` on `path`.
    pub fn with_operation(mut self, path: &str, method: Method, operation: Operation) -> Self {
        self.props
            .paths
            .paths
            .entry(path.to_string())
            .or_default()
            .set_operation(method, operation);
        self
    }
}
