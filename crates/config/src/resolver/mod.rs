//! Option resolution across the environment and both settings files.
//!
//! Responsibilities:
//! - Query the environment, the flat file and the sectioned file in that order.
//! - Cast the first present value, or fall back to the caller's default.
//! - Report which layer supplied the value.
//!
//! Does NOT handle:
//! - Parsing either file format (see `store`).
//! - Caching. Every call re-reads both files.
//!
//! Invariants / Assumptions:
//! - The order environment > flat file > sectioned file is fixed.
//! - A present value stops the cascade, even when it is empty.
//! - A value that fails to cast is fatal; lower layers and defaults are not consulted.
//! - Defaults are returned as given. A boolean cast requires a boolean default.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cast::{FromRaw, cast};
use crate::constants::{FLAT_FILE_NAME, SECTIONED_FILE_NAME};
use crate::error::ConfigError;
use crate::store::{EnvironmentStore, FlatFileStore, SectionedFileStore, Store};
use crate::value::{CastKind, Resolution, Source, Value};

#[cfg(test)]
mod tests;

/// Resolves options from the environment, a flat file and a sectioned file.
#[derive(Debug, Clone)]
pub struct Resolver {
    flat: FlatFileStore,
    sectioned: SectionedFileStore,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a resolver reading `.env` and `settings.ini` from the working directory.
    pub fn new() -> Self {
        Self {
            flat: FlatFileStore::new(FLAT_FILE_NAME),
            sectioned: SectionedFileStore::new(SECTIONED_FILE_NAME),
        }
    }

    /// Create a resolver reading `.env` and `settings.ini` from `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            flat: FlatFileStore::new(dir.join(FLAT_FILE_NAME)),
            sectioned: SectionedFileStore::new(dir.join(SECTIONED_FILE_NAME)),
        }
    }

    /// Override the flat definitions file path.
    pub fn with_flat_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.flat = FlatFileStore::new(path);
        self
    }

    /// Override the sectioned settings file path.
    pub fn with_sectioned_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sectioned = SectionedFileStore::new(path);
        self
    }

    pub fn flat_file_path(&self) -> &Path {
        self.flat.path()
    }

    pub fn sectioned_file_path(&self) -> &Path {
        self.sectioned.path()
    }

    /// The stores in priority order.
    fn stores(&self) -> [&dyn Store; 3] {
        [&EnvironmentStore, &self.flat, &self.sectioned]
    }

    /// Find the raw value of `option` in the first layer that has it.
    ///
    /// No casting and no defaults are applied.
    pub fn lookup(&self, option: &str) -> Result<Option<(String, Source)>, ConfigError> {
        if option.is_empty() {
            return Err(ConfigError::EmptyOption);
        }

        for store in self.stores() {
            let source = store.source();
            match store.get(option)? {
                Some(raw) => {
                    debug!(option, %source, present = true, "store consulted");
                    return Ok(Some((raw, source)));
                }
                None => debug!(option, %source, present = false, "store consulted"),
            }
        }

        Ok(None)
    }

    /// Resolve `option`, reporting which layer supplied the value.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` if the present value cannot be cast.
    /// - `ConfigError::InvalidDefault` if `cast` is boolean and the default is not.
    /// - `ConfigError::NotFound` if no layer has the option and there is no default.
    /// - `ConfigError::FlatFileRead` if the flat file exists but is unreadable.
    pub fn resolve_with_source(
        &self,
        option: &str,
        default: Option<Value>,
        cast_kind: CastKind,
    ) -> Result<Resolution, ConfigError> {
        if let Some((raw, source)) = self.lookup(option)? {
            let value = cast(&raw, cast_kind).map_err(|error| ConfigError::InvalidValue {
                option: option.to_string(),
                origin: source,
                error,
            })?;
            debug!(option, %source, cast = %cast_kind, "option resolved");
            return Ok(Resolution { value, source });
        }

        match default {
            Some(default) => {
                if cast_kind == CastKind::Boolean && !default.is_bool() {
                    return Err(ConfigError::InvalidDefault {
                        option: option.to_string(),
                        default,
                    });
                }
                debug!(option, "option resolved from default");
                Ok(Resolution {
                    value: default,
                    source: Source::Default,
                })
            }
            None => Err(ConfigError::NotFound {
                option: option.to_string(),
            }),
        }
    }

    /// Resolve `option` to a value.
    ///
    /// See [`Resolver::resolve_with_source`] for the error conditions.
    pub fn resolve(
        &self,
        option: &str,
        default: Option<Value>,
        cast_kind: CastKind,
    ) -> Result<Value, ConfigError> {
        self.resolve_with_source(option, default, cast_kind)
            .map(|resolution| resolution.value)
    }

    /// Resolve `option` straight into `T`.
    ///
    /// The raw value is cast with `T`'s rules; a default is returned as is.
    pub fn get<T: FromRaw>(&self, option: &str, default: Option<T>) -> Result<T, ConfigError> {
        match self.lookup(option)? {
            Some((raw, source)) => {
                debug!(option, %source, cast = %T::KIND, "option resolved");
                T::from_raw(&raw).map_err(|error| ConfigError::InvalidValue {
                    option: option.to_string(),
                    origin: source,
                    error,
                })
            }
            None => default.ok_or_else(|| ConfigError::NotFound {
                option: option.to_string(),
            }),
        }
    }
}

/// Resolve `option` with a resolver rooted at the working directory.
///
/// Equivalent to `Resolver::new().resolve(option, default, cast_kind)`.
pub fn config(
    option: &str,
    default: Option<Value>,
    cast_kind: CastKind,
) -> Result<Value, ConfigError> {
    Resolver::new().resolve(option, default, cast_kind)
}
