//! # oapi-spec — Spec Object Model
//!
//! In-memory representation of an OpenAPI 2.0 contract: schema and items
//! nodes, parameters, operations, responses, security schemes, paths, and
//! the document that ties them together.
//!
//! ## Key Design Principles
//!
//! 1. **References are a sum type.** [`Refable`] is either a `$ref` or an
//!    inline body. A node carrying both fails to decode.
//!
//! 2. **Flattened sub-groups.** Compound nodes encode each sub-group
//!    independently and flatten the results into one object; decoding runs
//!    every group against the same raw object. See [`flatten`].
//!
//! 3. **Vendor extensions survive.** `x-` members are preserved verbatim on
//!    every node type that supports them.
//!
//! 4. **Inheritance-aware accessors.** [`Document::consumes_for`],
//!    [`Document::produces_for`], and [`Document::security_for`] resolve
//!    operation-level overrides against document defaults.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oapi-*` crates (this is the leaf of the DAG).
//! - No I/O: decoding works on text or values handed in by the caller.
//! - No `$ref` resolution beyond local lookups; the tree is assumed to be
//!   fully resolved and acyclic.

pub mod document;
pub mod error;
pub mod flatten;
pub mod items;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod responses;
pub mod schema;
pub mod security;
pub mod value;
pub mod yaml;

// Re-export primary types for ergonomic imports.
pub use document::{Document, DocumentProps, Info, OperationRef, Tag};
pub use error::SpecError;
pub use flatten::{Extensions, FlatObject};
pub use items::{CollectionFormat, Items, ItemsNode, SimpleSchema};
pub use operation::{Method, Operation, OperationProps, PathItem, Paths};
pub use parameter::{Parameter, ParameterLocation, ParameterNode};
pub use reference::{Reference, Refable};
pub use responses::{Response, ResponseNode, Responses};
pub use schema::{Additional, CommonValidations, Schema, SchemaItems, SchemaNode, SchemaProps, SimpleType};
pub use security::{ApiKeyLocation, OAuthFlow, SecurityRequirement, SecurityScheme};
pub use value::ValueKind;
