// ── Payload field access ──
//
// Typed lookups over raw `serde_json::Value` payloads. Every helper names
// the field it failed on, so a reported fault points at the exact key.
// Absence is `MissingField`; a present key of the wrong type is
// `InvalidField`; unparseable timestamp text is `Validation`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::CoreError;

// ── Lookups ────────────────────────────────────────────────────────

/// Required key. A present `null` counts as present.
pub(crate) fn field<'a>(raw: &'a Value, key: &str) -> Result<&'a Value, CoreError> {
    match raw {
        Value::Object(map) => map.get(key).ok_or_else(|| CoreError::missing(key)),
        _ => Err(CoreError::invalid(key, "object containing the field")),
    }
}

/// Optional key. Absent and `null` both yield `None`.
pub(crate) fn opt_field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

// ── Scalars ────────────────────────────────────────────────────────

pub(crate) fn as_str<'a>(value: &'a Value, name: &str) -> Result<&'a str, CoreError> {
    value.as_str().ok_or_else(|| CoreError::invalid(name, "string"))
}

pub(crate) fn str_field<'a>(raw: &'a Value, key: &str) -> Result<&'a str, CoreError> {
    as_str(field(raw, key)?, key)
}

/// Optional string; a present value of another type is an error.
pub(crate) fn opt_str_field(raw: &Value, key: &str) -> Result<Option<String>, CoreError> {
    opt_field(raw, key)
        .map(|v| as_str(v, key).map(str::to_owned))
        .transpose()
}

/// Identifier-like value: strings pass through, numbers are rendered.
pub(crate) fn as_text(value: &Value, name: &str) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(CoreError::invalid(name, "string or number")),
    }
}

/// Integer from a JSON integer, a float (truncated) or a numeric string.
pub(crate) fn as_int(value: &Value, name: &str) -> Result<i64, CoreError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .ok_or_else(|| CoreError::invalid(name, "integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoreError::invalid(name, "integer")),
        _ => Err(CoreError::invalid(name, "integer")),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

pub(crate) fn int_field(raw: &Value, key: &str) -> Result<i64, CoreError> {
    as_int(field(raw, key)?, key)
}

/// Float from a JSON number or a numeric string.
pub(crate) fn as_float(value: &Value, name: &str) -> Result<f64, CoreError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| CoreError::invalid(name, "number")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::invalid(name, "number")),
        _ => Err(CoreError::invalid(name, "number")),
    }
}

pub(crate) fn float_field(raw: &Value, key: &str) -> Result<f64, CoreError> {
    as_float(field(raw, key)?, key)
}

/// Loose truthiness: `null`, `false`, zero and empty strings are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub(crate) fn as_array<'a>(value: &'a Value, name: &str) -> Result<&'a Vec<Value>, CoreError> {
    value.as_array().ok_or_else(|| CoreError::invalid(name, "list"))
}

// ── Timestamps ─────────────────────────────────────────────────────

/// Parse backend timestamp text as UTC.
///
/// Accepts RFC 3339 (with `Z` or an offset) and offset-less ISO 8601,
/// which is taken to be UTC.
pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CoreError::validation(format!("invalid timestamp {text:?}")))
}

pub(crate) fn timestamp_field(raw: &Value, key: &str) -> Result<DateTime<Utc>, CoreError> {
    parse_timestamp(str_field(raw, key)?)
}
