//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Knobs applied when compiling a schema.
///
/// Every field has a default, so an empty config file yields
/// [`ValidatorOptions::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Check `format` refinements of known formats.
    pub validate_formats: bool,
    /// Allowed distance from a whole quotient for `multipleOf`.
    pub multiple_of_tolerance: f64,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            validate_formats: true,
            multiple_of_tolerance: 1e-9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let options: ValidatorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ValidatorOptions::default());
        assert!(options.validate_formats);
    }

    #[test]
    fn test_partial_yaml_config() {
        let options: ValidatorOptions =
            serde_yaml::from_str("validate_formats: false\n").unwrap();
        assert!(!options.validate_formats);
        assert_eq!(options.multiple_of_tolerance, 1e-9);
    }

    #[test]
    fn test_unknown_option_rejected() {
        assert!(serde_json::from_str::<ValidatorOptions>(r#"{"strict": true}"#).is_err());
    }
}
