//! Sectioned `settings.ini` file.
//!
//! Responsibilities:
//! - Parse `[section]` headers and `key = value` / `key: value` lines.
//! - Expand `%(name)s` references for values that consist of a reference.
//! - Answer lookups from the `settings` section only.
//! - Fold a `[DEFAULT]` section into the default area used by references.
//!
//! Does NOT handle:
//! - Multi-line values, includes or section inheritance.
//!
//! Invariants:
//! - A missing file, section or key is absence.
//! - An unreadable or malformed file is also absence, reported with `warn!`.
//! - Keys and section names are case-sensitive.
//! - Each reference name is expanded at most once per lookup, and an expanded
//!   value never exceeds `MAX_INTERPOLATED_LEN` bytes.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use super::{Store, trim_value};
use crate::constants::{
    DEFAULT_SECTION, MAX_INTERPOLATED_LEN, MAX_INTERPOLATION_DEPTH, SETTINGS_SECTION,
};
use crate::error::{ConfigError, SectionedParseError};
use crate::value::Source;

type Section = HashMap<String, String>;

/// Parsed contents of a sectioned file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedFile {
    /// Keys that appear before the first section header or under `[DEFAULT]`.
    defaults: Section,
    sections: HashMap<String, Section>,
}

impl SectionedFile {
    /// Parse sectioned file contents.
    ///
    /// # Errors
    ///
    /// Returns `SectionedParseError` for an unclosed or empty section header,
    /// an empty key, or a line that is neither a comment nor a key line.
    pub fn parse(content: &str) -> Result<Self, SectionedParseError> {
        let mut file = SectionedFile::default();
        let mut current: Option<String> = None;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let Some((name, _)) = header.split_once(']') else {
                    return Err(SectionedParseError {
                        line: line_no,
                        reason: "unclosed section header",
                    });
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(SectionedParseError {
                        line: line_no,
                        reason: "empty section name",
                    });
                }
                if name == DEFAULT_SECTION {
                    current = None;
                } else {
                    file.sections.entry(name.to_string()).or_default();
                    current = Some(name.to_string());
                }
                continue;
            }

            let Some(split) = line.find(['=', ':']) else {
                return Err(SectionedParseError {
                    line: line_no,
                    reason: "expected `key = value`",
                });
            };
            let key = line[..split].trim();
            if key.is_empty() {
                return Err(SectionedParseError {
                    line: line_no,
                    reason: "empty key",
                });
            }
            let value = parse_value(&line[split + 1..]);

            let section = match &current {
                Some(name) => file.sections.entry(name.clone()).or_default(),
                None => &mut file.defaults,
            };
            section.insert(key.to_string(), value.to_string());
        }

        Ok(file)
    }

    /// Names of the sections written in the file, excluding `DEFAULT`.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// The raw keys of `name`. `DEFAULT` names the default area and is
    /// always present.
    pub fn section(&self, name: &str) -> Option<&HashMap<String, String>> {
        if name == DEFAULT_SECTION {
            Some(&self.defaults)
        } else {
            self.sections.get(name)
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// The raw value of `key` in `section`, without interpolation.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(String::as_str)
    }

    /// The value of `key` in `section`, with `%(name)s` references expanded.
    ///
    /// Expansion only happens when the whole value has the form `%(...)s`;
    /// any other value is returned as written.
    pub fn get_interpolated(&self, section: &str, key: &str) -> Option<String> {
        let raw = self.get(section, key)?;
        if is_reference_form(raw) {
            Some(self.interpolate(section, key, raw))
        } else {
            Some(raw.to_string())
        }
    }

    /// Look a reference up in `section`, then in the section-less defaults.
    fn lookup_reference(&self, section: &str, name: &str) -> Option<&str> {
        self.get(section, name)
            .or_else(|| self.defaults.get(name).map(String::as_str))
    }

    fn interpolate(&self, section: &str, key: &str, raw: &str) -> String {
        let mut value = raw.to_string();
        let mut expanded = HashSet::from([key.to_string()]);

        for _ in 0..MAX_INTERPOLATION_DEPTH {
            let Some(name) = first_reference(&value).map(str::to_string) else {
                break;
            };
            // A name that comes back closes a cycle.
            if expanded.contains(&name) {
                break;
            }
            let Some(replacement) = self.lookup_reference(section, &name) else {
                break;
            };

            let pattern = format!("%({name})s");
            let occurrences = value.matches(&pattern).count();
            let kept = value.len() - occurrences * pattern.len();
            if kept + occurrences * replacement.len() > MAX_INTERPOLATED_LEN {
                trace!(reference = %name, "interpolated value too long, stopping expansion");
                break;
            }

            value = value.replace(&pattern, replacement);
            expanded.insert(name);
        }

        value
    }
}

/// Trim a raw value, dropping an inline comment when the value is unquoted.
fn parse_value(raw: &str) -> &str {
    let value = raw.trim();
    let unquoted = trim_value(value);
    if unquoted.len() != value.len() {
        return unquoted;
    }
    match inline_comment_start(value) {
        Some(pos) => trim_value(&value[..pos]),
        None => value,
    }
}

/// Byte offset of a whitespace-preceded `#` or `;`.
fn inline_comment_start(value: &str) -> Option<usize> {
    let bytes = value.as_bytes();
    (1..bytes.len()).find(|&i| {
        (bytes[i] == b'#' || bytes[i] == b';') && bytes[i - 1].is_ascii_whitespace()
    })
}

fn is_reference_form(value: &str) -> bool {
    value.len() >= 4 && value.starts_with("%(") && value.ends_with(")s")
}

/// Name inside the first well-formed `%(name)s` reference.
fn first_reference(value: &str) -> Option<&str> {
    let mut rest = value;
    let mut offset = 0;
    while let Some(start) = rest.find("%(") {
        let name_start = offset + start + 2;
        let tail = &value[name_start..];
        if let Some(close) = tail.find(')') {
            if close > 0 && tail[close + 1..].starts_with('s') {
                return Some(&tail[..close]);
            }
        }
        offset = name_start;
        rest = &value[offset..];
    }
    None
}

/// Store backed by the `settings` section of a sectioned file.
#[derive(Debug, Clone)]
pub struct SectionedFileStore {
    path: PathBuf,
}

impl SectionedFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, treating every failure as absence.
    pub fn load(&self) -> Option<SectionedFile> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "sectioned file not found");
                return None;
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    kind = %e.kind(),
                    "sectioned file unreadable, ignoring it"
                );
                return None;
            }
        };

        match SectionedFile::parse(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "sectioned file invalid, ignoring it");
                None
            }
        }
    }
}

impl Store for SectionedFileStore {
    fn source(&self) -> Source {
        Source::SectionedFile
    }

    fn get(&self, option: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .load()
            .and_then(|file| file.get_interpolated(SETTINGS_SECTION, option)))
    }
}
