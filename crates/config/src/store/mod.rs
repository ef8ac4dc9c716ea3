//! Sources of raw option values.
//!
//! Responsibilities:
//! - Define the `Store` capability shared by every source.
//! - Provide the environment, flat-file and sectioned-file stores.
//! - Share the value trimming and unquoting rules used by both file formats.
//!
//! Does NOT handle:
//! - Casting raw values (see `cast.rs`).
//! - Ordering sources or applying defaults (see `resolver`).
//!
//! Invariants:
//! - `Ok(None)` means absent; an empty string is present.
//! - Files are read on every lookup; nothing is cached.

mod env;
mod flat;
mod sectioned;

pub use env::EnvironmentStore;
pub use flat::{FlatFileStore, parse_flat};
pub use sectioned::{SectionedFile, SectionedFileStore};

use crate::error::ConfigError;
use crate::value::Source;

/// A source that can report the raw value of an option.
pub trait Store: Send + Sync {
    /// The layer this store represents.
    fn source(&self) -> Source;

    /// Look up `option`.
    ///
    /// Returns `Ok(None)` when the store has no entry, and `Err` only for
    /// conditions that must abort the resolution.
    fn get(&self, option: &str) -> Result<Option<String>, ConfigError>;
}

/// Trim surrounding whitespace, then strip one matching pair of quotes.
///
/// Quoted values keep their inner spacing: `" text"` becomes ` text`.
pub(crate) fn trim_value(raw: &str) -> &str {
    unquote(raw.trim())
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
