//! Individual constraint checks.
//!
//! Each check is a pure function over one field value. A check whose
//! constraint is not configured, or does not apply to the value's type,
//! passes.

use super::{FieldType, FieldViolation};
use serde_json::Value;

/// Resolves a dotted path inside `payload`.
///
/// Returns `None` when any segment is missing or an intermediate value is
/// not an object.
#[must_use]
pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(payload, |current, segment| current.as_object()?.get(segment))
}

/// Returns the JSON type name of `value` for violation messages.
#[must_use]
pub const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks that `value` holds the `expected` JSON type.
///
/// # Errors
///
/// Returns a violation naming both the expected and the actual type.
pub fn check_type(path: &str, value: &Value, expected: FieldType) -> Result<(), FieldViolation> {
    if expected.matches(value) {
        return Ok(());
    }
    Err(FieldViolation::new(
        path,
        format!("expected {expected}, found {}", describe(value)),
    ))
}

/// Checks enum membership.
///
/// # Errors
///
/// Returns a violation listing the allowed values.
pub fn check_allowed(path: &str, value: &Value, allowed: &[Value]) -> Result<(), FieldViolation> {
    if allowed.is_empty() || allowed.contains(value) {
        return Ok(());
    }
    let listed = allowed.iter().map(render).collect::<Vec<_>>().join(", ");
    Err(FieldViolation::new(
        path,
        format!("expected one of [{listed}], found {}", render(value)),
    ))
}

/// Checks that an array holds at least one element.
///
/// # Errors
///
/// Returns a violation when the array is empty.
pub fn check_non_empty(path: &str, value: &Value, enabled: bool) -> Result<(), FieldViolation> {
    match value.as_array() {
        Some(items) if enabled && items.is_empty() => {
            Err(FieldViolation::new(path, "expected non-empty array"))
        }
        _ => Ok(()),
    }
}

/// Checks an inclusive numeric range.
///
/// # Errors
///
/// Returns a violation naming the configured bounds.
pub fn check_range(
    path: &str,
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), FieldViolation> {
    let Some(number) = value.as_f64() else {
        return Ok(());
    };
    let below = min.is_some_and(|bound| number < bound);
    let above = max.is_some_and(|bound| number > bound);
    if !below && !above {
        return Ok(());
    }
    let expectation = match (min, max) {
        (Some(lower), Some(upper)) => format!("between {lower} and {upper}"),
        (Some(lower), None) => format!(">= {lower}"),
        (None, Some(upper)) => format!("<= {upper}"),
        (None, None) => return Ok(()),
    };
    Err(FieldViolation::new(
        path,
        format!("expected value {expectation}, found {number}"),
    ))
}

/// Checks the minimum character count of a string, ignoring surrounding
/// whitespace.
///
/// # Errors
///
/// Returns `expected non-empty string` for a minimum of one, otherwise a
/// violation naming the required and actual lengths.
pub fn check_min_length(
    path: &str,
    value: &Value,
    min_length: Option<usize>,
) -> Result<(), FieldViolation> {
    let (Some(text), Some(required)) = (value.as_str(), min_length) else {
        return Ok(());
    };
    let length = text.trim().chars().count();
    if length >= required {
        return Ok(());
    }
    if required == 1 {
        return Err(FieldViolation::new(path, "expected non-empty string"));
    }
    Err(FieldViolation::new(
        path,
        format!("expected at least {required} characters, found {length}"),
    ))
}

fn render(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}
