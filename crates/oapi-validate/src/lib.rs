//! # oapi-validate — Validator Composition Engine
//!
//! Checks runtime values against schema constraint trees from `oapi-spec`.
//!
//! ## Model
//!
//! A [`SchemaValidator`] is compiled once per schema node. Compilation
//! resolves local references and keeps only the constraint rules whose
//! fields the node populates. Validation then asks each kept rule whether it
//! applies to the value's runtime shape and runs every rule that does.
//!
//! - Violations never stop a pass; every one is collected into the
//!   [`ValidationResult`] in discovery order.
//! - Each rule run adds one to [`ValidationResult::validation_count`].
//! - Paths are dotted (`items.0.name`); the root is the empty path.
//!
//! ## Crate Policy
//!
//! - Depends only on `oapi-spec` internally.
//! - Configuration errors are raised by constructors, never by `validate`.
//! - No `unwrap()` outside tests.

pub mod equality;
pub mod error;
pub mod options;
pub mod result;
mod rules;
pub mod validator;

pub use equality::values_equal;
pub use error::{ConfigError, SchemaValidationError};
pub use options::ValidatorOptions;
pub use result::{ValidationResult, ValidationViolations, Violation};
pub use validator::SchemaValidator;
