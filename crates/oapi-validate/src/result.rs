//! # Validation Results
//!
//! A [`ValidationResult`] is the outcome of one validation pass: the
//! violations in discovery order plus the number of rule runs it took.
//! Results from sub-validators merge by concatenating errors and summing
//! counts.

use std::fmt;

use crate::error::SchemaValidationError;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the offending value; empty for the root.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Outcome of validating one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<Violation>,
    validation_count: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no constraint was violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in discovery order.
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Number of rule runs that produced this result.
    pub fn validation_count(&self) -> usize {
        self.validation_count
    }

    /// Record a violation at `path`.
    pub fn add_error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(Violation::new(path, message));
    }

    /// Count one rule run.
    pub fn inc(&mut self) {
        self.validation_count += 1;
    }

    /// Append another result's errors and add its count.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.validation_count += other.validation_count;
    }

    /// Convert into a `Result`, failing when any violation was recorded.
    pub fn into_result(self) -> Result<(), SchemaValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed(self.errors.into()))
        }
    }
}

/// Extend `parent` with one path segment.
pub(crate) fn join_path(parent: &str, segment: impl fmt::Display) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}
