//! Tests for the resolver.
//!
//! Responsibilities:
//! - Test layer precedence and fallthrough.
//! - Test resolution of options defined in each file format.
//! - Test defaults and the fatal error conditions.
//! - Test resolution relative to the working directory.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests that change the working directory also hold `env_lock()`.
//! - Files live in `tempfile` directories and are cleaned up automatically.

use std::path::Path;
use std::sync::Mutex;

use super::Resolver;
use crate::constants::{FLAT_FILE_NAME, SECTIONED_FILE_NAME};
use crate::test_util::write_file;

pub mod precedence_tests;

pub const ENV_FILE: &str = r#"
KeyTrue=True
KeyOne=1
KeyYes=yes
KeyOn=on
KeyFalse=False
KeyZero=0
KeyNo=no
KeyOff=off
KeyEmpty=
#CommentedKey=None
PercentNotEscaped=%%
NoInterpolation=%(KeyOff)s
IgnoreSpace = text
RespectSingleQuoteSpace = ' text'
RespectDoubleQuoteSpace = " text"
KeyOverrideByEnv=NotThis
"#;

pub const INI_FILE: &str = r#"
[settings]
KeyTrue=True
KeyOne=1
KeyYes=yes
KeyOn=on
KeyFalse=False
KeyZero=0
KeyNo=no
KeyOff=off
KeyEmpty=
#CommentedKey=None
PercentIsEscaped=%%
Interpolation=%(KeyOff)s
IgnoreSpace = text
RespectSingleQuoteSpace = ' text'
RespectDoubleQuoteSpace = " text"
KeyOverrideByEnv=NotThis
"#;

/// Returns the global test lock for working-directory isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Resolver over a directory holding only the flat file.
pub fn flat_only(dir: &Path) -> Resolver {
    write_file(dir, FLAT_FILE_NAME, ENV_FILE);
    Resolver::in_dir(dir)
}

/// Resolver over a directory holding only the sectioned file.
pub fn sectioned_only(dir: &Path) -> Resolver {
    write_file(dir, SECTIONED_FILE_NAME, INI_FILE);
    Resolver::in_dir(dir)
}
