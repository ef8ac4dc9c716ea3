//! Value types shared by the stores, the caster and the resolver.

use std::fmt;
use std::str::FromStr;

use crate::error::CastError;

/// The scalar type a raw string is coerced to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CastKind {
    /// Keep the raw string.
    #[default]
    None,
    Boolean,
    Integer,
    Float,
}

impl CastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CastKind::None => "none",
            CastKind::Boolean => "bool",
            CastKind::Integer => "int",
            CastKind::Float => "float",
        }
    }
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the cast names accepted at the string-typed entry points.
impl FromStr for CastKind {
    type Err = CastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" | "str" | "string" => Ok(CastKind::None),
            "bool" | "boolean" => Ok(CastKind::Boolean),
            "int" | "integer" => Ok(CastKind::Integer),
            "float" => Ok(CastKind::Float),
            _ => Err(CastError::UnknownCastKind(s.to_string())),
        }
    }
}

/// A resolved, typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Value {
    /// The cast kind that produces values of this variant.
    pub fn kind(&self) -> CastKind {
        match self {
            Value::Str(_) => CastKind::None,
            Value::Bool(_) => CastKind::Boolean,
            Value::Int(_) => CastKind::Integer,
            Value::Float(_) => CastKind::Float,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// The layer that supplied a resolved value, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Environment,
    FlatFile,
    SectionedFile,
    Default,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Environment => "environment",
            Source::FlatFile => "flat file",
            Source::SectionedFile => "sectioned file",
            Source::Default => "default",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved value together with the layer it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    pub source: Source,
}
