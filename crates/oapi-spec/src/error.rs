//! # Error Types
//!
//! Errors raised while decoding or encoding spec nodes. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Decode errors carry the underlying serde message.
//! - Structural errors name the offending field or reference so a spec
//!   author can find it without a debugger.

use thiserror::Error;

/// Top-level error type for the spec object model.
#[derive(Error, Debug)]
pub enum SpecError {
    /// JSON encoding or decoding failed.
    ///
    /// Nested nodes re-enter serde on the way out, so the message is passed
    /// through unprefixed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML decoding failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A YAML value has no JSON equivalent.
    #[error("yaml conversion error: {0}")]
    YamlConversion(String),

    /// Two sub-groups of a node emitted the same member name while
    /// being flattened into one object.
    #[error("field '{0}' is emitted by more than one group")]
    FieldCollision(String),

    /// A sub-group or node did not encode to (or decode from) an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A node carries a `$ref` alongside inline fields.
    #[error("node with reference '{reference}' also carries inline field '{field}'")]
    MixedReference {
        /// The `$ref` URI.
        reference: String,
        /// The first inline field found next to it.
        field: String,
    },

    /// A `$ref` member is present but is not a string.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}
