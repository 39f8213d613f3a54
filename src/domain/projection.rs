//! Checked projections over upstream JSON.
//!
//! Every accessor distinguishes three cases explicitly:
//!
//! - key missing → [`ResolveError::MissingPath`]
//! - key present with `null` → `Ok(None)` (upstream's own null passes through)
//! - key present with the wrong JSON kind → [`ResolveError::TypeMismatch`]
//!
//! Nothing here ever substitutes a default value.

use serde_json::{Map, Value};

/// Failure to project a field out of an otherwise successful upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Missing `{path}` in upstream payload")]
    MissingPath { path: String },

    #[error("Expected `{path}` to be {expected} in upstream payload")]
    TypeMismatch { path: String, expected: &'static str },
}

impl ResolveError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingPath { path: path.into() }
    }

    pub fn mismatch(path: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
        }
    }
}

/// Result type for field projections.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Treats `value` as a JSON object, naming it `at` in errors.
pub fn as_object<'a>(value: &'a Value, at: &str) -> ResolveResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ResolveError::mismatch(at, "an object"))
}

/// Looks up `key` in `object`, failing when the key is absent.
pub fn require<'a>(object: &'a Map<String, Value>, at: &str, key: &str) -> ResolveResult<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| ResolveError::missing(join(at, key)))
}

/// Projects a nullable string.
pub fn string<'a>(
    object: &'a Map<String, Value>,
    at: &str,
    key: &str,
) -> ResolveResult<Option<&'a str>> {
    match require(object, at, key)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        _ => Err(ResolveError::mismatch(join(at, key), "a string")),
    }
}

/// Projects a nullable integer.
///
/// Floats with no fractional part are accepted, since upstream encodes epoch
/// timestamps as `1700000000.0`.
pub fn integer(object: &Map<String, Value>, at: &str, key: &str) -> ResolveResult<Option<i64>> {
    match require(object, at, key)? {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(ResolveError::mismatch(join(at, key), "an integer")),
            }
        }
        _ => Err(ResolveError::mismatch(join(at, key), "an integer")),
    }
}

/// Projects a nullable boolean.
pub fn boolean(object: &Map<String, Value>, at: &str, key: &str) -> ResolveResult<Option<bool>> {
    match require(object, at, key)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        _ => Err(ResolveError::mismatch(join(at, key), "a boolean")),
    }
}

/// Projects a nested object that must be present and non-null.
pub fn object<'a>(object: &'a Map<String, Value>, at: &str, key: &str) -> ResolveResult<&'a Value> {
    match require(object, at, key)? {
        Value::Null => Err(ResolveError::missing(join(at, key))),
        value @ Value::Object(_) => Ok(value),
        _ => Err(ResolveError::mismatch(join(at, key), "an object")),
    }
}

/// Projects a list that must be present.
pub fn list<'a>(object: &'a Map<String, Value>, at: &str, key: &str) -> ResolveResult<&'a [Value]> {
    match require(object, at, key)? {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Null => Err(ResolveError::missing(join(at, key))),
        _ => Err(ResolveError::mismatch(join(at, key), "a list")),
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{at}.{key}")
    }
}
