//! Flat `.env`-style definitions file.
//!
//! Responsibilities:
//! - Parse `KEY=VALUE` lines into a mapping.
//! - Re-read the file on every lookup so edits are visible immediately.
//!
//! Does NOT handle:
//! - Interpolation, escape sequences or `$VAR` expansion. Values are literal.
//! - Exporting entries into the process environment.
//!
//! Invariants:
//! - A missing file is an empty mapping, not an error.
//! - Any other read failure is fatal and never includes file contents.
//! - Later duplicate keys overwrite earlier ones.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{Store, trim_value};
use crate::error::ConfigError;
use crate::value::Source;

/// Parse the contents of a flat definitions file.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Each remaining
/// line is split on its first `=`.
pub fn parse_flat(content: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        entries.insert(key.trim().to_string(), trim_value(value).to_string());
    }

    entries
}

/// Store backed by a flat definitions file.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FlatFileRead` if the file exists but cannot be
    /// read as UTF-8 text. A missing file yields an empty mapping.
    pub fn load(&self) -> Result<HashMap<String, String>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_flat(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "flat file not found");
                Ok(HashMap::new())
            }
            Err(e) => Err(ConfigError::FlatFileRead {
                path: self.path.clone(),
                kind: e.kind(),
            }),
        }
    }
}

impl Store for FlatFileStore {
    fn source(&self) -> Source {
        Source::FlatFile
    }

    fn get(&self, option: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.load()?.remove(option))
    }
}
