//! Schema and field rule definitions.

use super::{FieldViolation, ValidationReport, rules};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// JSON type a field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// Returns the lowercase name used in violation messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Returns `true` when `value` holds this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints attached to one field of a payload.
///
/// Rules are built fluently:
///
/// ```
/// use lectern::validation::{FieldRule, FieldType};
///
/// let rule = FieldRule::new("paper.year")
///     .of_type(FieldType::Integer)
///     .min(1000.0)
///     .max(2100.0);
/// assert_eq!(rule.path(), "paper.year");
/// assert!(!rule.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    path: String,
    required: bool,
    field_type: Option<FieldType>,
    allowed: Vec<Value>,
    non_empty: bool,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
}

impl FieldRule {
    /// Creates an unconstrained, optional rule for the field at `path`.
    ///
    /// `path` uses dots to descend into nested objects, e.g. `paper.title`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: false,
            field_type: None,
            allowed: Vec::new(),
            non_empty: false,
            min: None,
            max: None,
            min_length: None,
        }
    }

    /// Shorthand for a required string with at least one non-blank character.
    #[must_use]
    pub fn non_empty_string(path: impl Into<String>) -> Self {
        Self::new(path)
            .required()
            .of_type(FieldType::String)
            .min_length(1)
    }

    /// Marks the field as required; absent and `null` values are rejected.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Requires the field to hold the given JSON type.
    #[must_use]
    pub const fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Restricts the field to one of the given values.
    #[must_use]
    pub fn one_of<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }

    /// Requires an array field to contain at least one element.
    #[must_use]
    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Sets the inclusive lower bound for a numeric field.
    #[must_use]
    pub const fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    /// Sets the inclusive upper bound for a numeric field.
    #[must_use]
    pub const fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    /// Sets the minimum trimmed character count for a string field.
    #[must_use]
    pub const fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Returns the dotted field path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` when the field must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Checks this rule against the whole payload, appending violations.
    fn check(&self, payload: &Value, violations: &mut Vec<FieldViolation>) {
        let Some(value) = rules::lookup(payload, &self.path).filter(|v| !v.is_null()) else {
            if self.required {
                violations.push(FieldViolation::new(&self.path, "is required"));
            }
            return;
        };

        if let Some(expected) = self.field_type
            && let Err(violation) = rules::check_type(&self.path, value, expected)
        {
            // Remaining checks assume the declared type.
            violations.push(violation);
            return;
        }

        let checks = [
            rules::check_allowed(&self.path, value, &self.allowed),
            rules::check_non_empty(&self.path, value, self.non_empty),
            rules::check_range(&self.path, value, self.min, self.max),
            rules::check_min_length(&self.path, value, self.min_length),
        ];
        violations.extend(checks.into_iter().filter_map(Result::err));
    }
}

/// An ordered set of field rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Creates a schema from the given rules.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = FieldRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Creates a schema that accepts every payload.
    #[must_use]
    pub const fn permissive() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validates a JSON payload against every rule.
    #[must_use]
    pub fn validate_value(&self, payload: &Value) -> ValidationReport {
        let mut violations = Vec::new();
        for rule in &self.rules {
            rule.check(payload, &mut violations);
        }
        ValidationReport::from_violations(violations)
    }

    /// Serializes `input` and validates the resulting JSON.
    ///
    /// A payload that cannot be serialized is reported as a violation of
    /// the root path `input`.
    #[must_use]
    pub fn validate<T: Serialize + ?Sized>(&self, input: &T) -> ValidationReport {
        match serde_json::to_value(input) {
            Ok(payload) => self.validate_value(&payload),
            Err(err) => ValidationReport::from_violations(vec![FieldViolation::new(
                "input",
                format!("cannot be represented as JSON: {err}"),
            )]),
        }
    }
}
