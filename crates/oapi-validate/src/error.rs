//! # Error Types
//!
//! Two failure classes are kept apart:
//!
//! - [`ConfigError`]: the schema itself cannot be compiled. Raised by the
//!   validator constructors, never by `validate`.
//! - [`SchemaValidationError`]: a value failed its constraints. Produced
//!   only when a caller converts a [`ValidationResult`] into a `Result`.
//!
//! [`ValidationResult`]: crate::ValidationResult

use thiserror::Error;

use crate::result::ValidationViolations;

/// A schema node that cannot be turned into a validator.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `pattern` is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending expression.
        pattern: String,
        /// Parser diagnostic.
        #[source]
        source: regex::Error,
    },

    /// `multipleOf` must be strictly positive.
    #[error("multipleOf must be greater than zero, found {0}")]
    InvalidMultipleOf(f64),

    /// A `$ref` could not be resolved against the document.
    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),

    /// A named definition does not exist in the document.
    #[error("unknown definition '{0}'")]
    UnknownDefinition(String),
}

/// A value did not conform to its schema.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// One or more constraints were violated.
    #[error("validation failed:\n{0}")]
    ValidationFailed(ValidationViolations),

    /// The validator could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Violation;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidMultipleOf(-2.0).to_string(),
            "multipleOf must be greater than zero, found -2"
        );
        assert_eq!(
            ConfigError::UnresolvedReference("#/definitions/Nope".into()).to_string(),
            "unresolved reference '#/definitions/Nope'"
        );
    }

    #[test]
    fn test_validation_failed_lists_violations() {
        let violations = ValidationViolations::from(vec![
            Violation::new("", "must be of type object, found array"),
            Violation::new("name", "is required"),
        ]);
        let err = SchemaValidationError::ValidationFailed(violations);
        assert_eq!(
            err.to_string(),
            "validation failed:\n  (root): must be of type object, found array\n  name: is required"
        );
    }
}
