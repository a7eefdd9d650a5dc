//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! The `param_*` helpers return a default when the key is missing or has the
//! wrong type, so they never fail. The `require_*` helpers are for inputs
//! with no sensible default (amplitude, wind) and report
//! `ParamNotFound`/`ParamTypeMismatch` instead.

use crate::error::SpectrumError;
use crate::vector::Vector2;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `u64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a [`Vector2`] written as `[x, y]` or `{"x": .., "y": ..}`,
/// returning `default` if missing or malformed.
pub fn param_vec2(params: &Value, name: &str, default: Vector2) -> Vector2 {
    params.get(name).and_then(as_vec2).unwrap_or(default)
}

/// Like [`param_f64`] but the key must be present and numeric.
pub fn require_f64(params: &Value, name: &str) -> Result<f64, SpectrumError> {
    let value = params
        .get(name)
        .ok_or_else(|| SpectrumError::ParamNotFound(name.to_string()))?;
    value.as_f64().ok_or_else(|| mismatch(name, "number", value))
}

/// Like [`param_vec2`] but the key must be present and well formed.
pub fn require_vec2(params: &Value, name: &str) -> Result<Vector2, SpectrumError> {
    let value = params
        .get(name)
        .ok_or_else(|| SpectrumError::ParamNotFound(name.to_string()))?;
    as_vec2(value).ok_or_else(|| mismatch(name, "[x, y]", value))
}

fn as_vec2(value: &Value) -> Option<Vector2> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            Some(Vector2::new(items[0].as_f64()?, items[1].as_f64()?))
        }
        Value::Object(map) => Some(Vector2::new(
            map.get("x")?.as_f64()?,
            map.get("y")?.as_f64()?,
        )),
        _ => None,
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> SpectrumError {
    let got = match got {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    SpectrumError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    }
}
