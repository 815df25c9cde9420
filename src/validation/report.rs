//! Validation outcome types.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single violated constraint, addressed by the dotted path of the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct FieldViolation {
    path: String,
    message: String,
}

impl FieldViolation {
    /// Creates a violation for the field at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the dotted path of the offending field.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the message without the path prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of validating one payload against a [`Schema`](super::Schema).
///
/// Serializes as `{"valid": bool, "errors": [string]}` so callers can render
/// per-field feedback directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    /// Creates a report from collected violations.
    #[must_use]
    pub const fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns `true` when no constraint was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the collected violations in schema order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns one path-prefixed message per violation.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Joins all messages into a single line, separated by `"; "`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors().join("; ")
    }
}

#[derive(Serialize)]
struct ReportWire {
    valid: bool,
    errors: Vec<String>,
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReportWire {
            valid: self.is_valid(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}
