//! Error types for option resolution.
//!
//! Responsibilities:
//! - Define the fatal conditions of a resolution (`ConfigError`).
//! - Define casting failures (`CastError`) and sectioned-file syntax failures
//!   (`SectionedParseError`).
//!
//! Does NOT handle:
//! - Absence of an option in a store. That is `Ok(None)`, never an error.
//!
//! Invariants:
//! - Every variant names the option or path it concerns.
//! - File read errors carry the I/O error kind only, never file contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::value::{Source, Value};

/// Fatal conditions that abort a resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Option name must not be empty")]
    EmptyOption,

    #[error("{option} not found. Declare it as envvar or define a default value.")]
    NotFound { option: String },

    /// A present value could not be cast. Never falls through to lower layers.
    #[error("Invalid value for {option} in {origin}: {error}")]
    InvalidValue {
        option: String,
        origin: Source,
        #[source]
        error: CastError,
    },

    /// A boolean cast was requested with a default that is not a boolean.
    #[error("Can't cast default '{default}' of {option} to bool")]
    InvalidDefault { option: String, default: Value },

    #[error("Environment variable {option} is not valid unicode")]
    NotUnicode { option: String },

    /// The flat file exists but could not be read.
    #[error("Failed to read flat file at {path}: {kind}")]
    FlatFileRead { path: PathBuf, kind: ErrorKind },
}

/// Errors produced when a raw string cannot be cast to the requested kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("not a boolean: {0}")]
    NotABoolean(String),

    #[error("not an integer: {0}")]
    NotAnInteger(String),

    #[error("not a float: {0}")]
    NotAFloat(String),

    /// A cast name that does not map to any `CastKind`.
    #[error("unknown cast kind: {0}")]
    UnknownCastKind(String),
}

/// Syntax error in a sectioned settings file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid sectioned file syntax at line {line}: {reason}")]
pub struct SectionedParseError {
    /// 1-based line number.
    pub line: usize,
    pub reason: &'static str,
}
