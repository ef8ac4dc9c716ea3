//! Process environment lookups.

use std::env::VarError;

use tracing::trace;

use super::Store;
use crate::error::ConfigError;
use crate::value::Source;

/// Reads options straight from the process environment.
///
/// Values are returned verbatim. A variable set to the empty string is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentStore;

impl Store for EnvironmentStore {
    fn source(&self) -> Source {
        Source::Environment
    }

    fn get(&self, option: &str) -> Result<Option<String>, ConfigError> {
        match std::env::var(option) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => {
                trace!(option, "environment variable not set");
                Ok(None)
            }
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                option: option.to_string(),
            }),
        }
    }
}
