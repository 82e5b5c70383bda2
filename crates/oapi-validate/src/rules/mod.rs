//! # Constraint Rules
//!
//! A rule checks one family of constraints. Rules are selected once, when a
//! schema is compiled, from the fields the schema actually populates. At
//! validation time each selected rule decides from the value's runtime
//! shape whether it applies; the schema's declared type plays no part in
//! that decision, so a type mismatch is reported by the type rule alone.
//!
//! ## Counting
//!
//! Every rule run adds exactly one to the validation count, whether or not
//! it finds a violation. Rules holding sub-validators merge their results
//! on top of that.

use std::fmt;

use oapi_spec::ValueKind;
use serde_json::Value;

use crate::result::ValidationResult;
use crate::validator::SchemaValidator;

mod array;
mod enumeration;
mod format;
mod numeric;
mod object;
mod text;
mod type_check;

pub(crate) use array::{ArrayRule, ItemsPolicy};
pub(crate) use enumeration::EnumRule;
pub(crate) use format::{FormatRule, KnownFormat};
pub(crate) use numeric::{Bound, NumericRule};
pub(crate) use object::ObjectRule;
pub(crate) use text::TextRule;
pub(crate) use type_check::TypeRule;

/// One family of constraints compiled from a schema node.
pub(crate) trait Rule: fmt::Debug + Send + Sync {
    /// Short identifier, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this rule has anything to say about a value of `kind`.
    fn applies(&self, kind: ValueKind) -> bool;

    /// Check `value`, reporting violations under `path`.
    fn validate(&self, value: &Value, path: &str) -> ValidationResult;
}

/// Compiled `additionalItems` / `additionalProperties`.
#[derive(Debug)]
pub(crate) enum AdditionalPolicy {
    Forbid,
    Allow,
    Schema(SchemaValidator),
}
