//! # Error Types
//!
//! - [`ContractMismatch`]: the registry and its document disagree. One
//!   value carries every problem found, one per line.
//! - [`CodecError`], [`HandlerError`], [`AuthError`]: failures raised by
//!   registered artifacts at request time.

use thiserror::Error;

/// Drift between registered artifacts and the document's requirements.
///
/// Displayed as the problem lines joined by `\n`, in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", problems.join("\n"))]
pub struct ContractMismatch {
    problems: Vec<String>,
}

impl ContractMismatch {
    pub(crate) fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }

    /// Individual problem lines.
    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

/// A payload could not be decoded or encoded.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Reading or writing the underlying stream failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The payload decoded but has no JSON representation.
    #[error("unsupported payload: {0}")]
    Unsupported(String),
}

/// An operation handler rejected or failed a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The bound parameters are unusable.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The handler ran and failed.
    #[error("operation failed: {0}")]
    Failed(String),
}

/// Authentication failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials were presented but rejected.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// A requirement names a scheme with no registered authenticator.
    #[error("no authenticator registered for scheme '{0}'")]
    UnknownScheme(String),

    /// No requirement set was satisfied.
    #[error("no security requirement satisfied")]
    Unsatisfied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_mismatch_joins_lines() {
        let err = ContractMismatch::new(vec![
            "missing [a] consumes registrations".into(),
            "missing [b] produces registrations".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "missing [a] consumes registrations\nmissing [b] produces registrations"
        );
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::UnknownScheme("basic".into()).to_string(),
            "no authenticator registered for scheme 'basic'"
        );
    }
}
