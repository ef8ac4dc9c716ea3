//! Casting raw option strings to typed values.
//!
//! Responsibilities:
//! - Coerce a raw string to the `CastKind` requested by the caller.
//! - Provide `FromRaw` so typed lookups can cast straight into `bool`, `i64`, `f64` or `String`.
//!
//! Invariants:
//! - Boolean casting is case-insensitive and table driven; the empty string is `false`.
//! - Numeric parsing is strict: no trimming, no partial parses.

use crate::error::CastError;
use crate::value::{CastKind, Value};

/// Truth table for boolean casting, keyed by lowercase spelling.
const BOOLEANS: &[(&str, bool)] = &[
    ("1", true),
    ("yes", true),
    ("true", true),
    ("on", true),
    ("0", false),
    ("no", false),
    ("false", false),
    ("off", false),
    ("", false),
];

/// Cast a raw string to a boolean using the fixed truth table.
pub fn cast_boolean(raw: &str) -> Result<bool, CastError> {
    let lowered = raw.to_lowercase();
    BOOLEANS
        .iter()
        .find(|(spelling, _)| *spelling == lowered)
        .map(|(_, value)| *value)
        .ok_or_else(|| CastError::NotABoolean(raw.to_string()))
}

fn cast_integer(raw: &str) -> Result<i64, CastError> {
    raw.parse::<i64>()
        .map_err(|_| CastError::NotAnInteger(raw.to_string()))
}

fn cast_float(raw: &str) -> Result<f64, CastError> {
    raw.parse::<f64>()
        .map_err(|_| CastError::NotAFloat(raw.to_string()))
}

/// Cast a raw string to the requested kind.
pub fn cast(raw: &str, kind: CastKind) -> Result<Value, CastError> {
    match kind {
        CastKind::None => Ok(Value::Str(raw.to_string())),
        CastKind::Boolean => cast_boolean(raw).map(Value::Bool),
        CastKind::Integer => cast_integer(raw).map(Value::Int),
        CastKind::Float => cast_float(raw).map(Value::Float),
    }
}

/// Types a resolved option can be read into directly.
pub trait FromRaw: Sized {
    /// Cast kind whose rules `from_raw` applies.
    const KIND: CastKind;

    fn from_raw(raw: &str) -> Result<Self, CastError>;
}

impl FromRaw for String {
    const KIND: CastKind = CastKind::None;

    fn from_raw(raw: &str) -> Result<Self, CastError> {
        Ok(raw.to_string())
    }
}

impl FromRaw for bool {
    const KIND: CastKind = CastKind::Boolean;

    fn from_raw(raw: &str) -> Result<Self, CastError> {
        cast_boolean(raw)
    }
}

impl FromRaw for i64 {
    const KIND: CastKind = CastKind::Integer;

    fn from_raw(raw: &str) -> Result<Self, CastError> {
        cast_integer(raw)
    }
}

impl FromRaw for f64 {
    const KIND: CastKind = CastKind::Float;

    fn from_raw(raw: &str) -> Result<Self, CastError> {
        cast_float(raw)
    }
}
