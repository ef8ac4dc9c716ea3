//! Layered option resolution for twelve-factor style settings.
//!
//! An option is looked up in the process environment, then in a flat `.env`
//! file, then in the `[settings]` section of `settings.ini`, and finally taken
//! from a caller-supplied default. The first value found is cast to the
//! requested type.
//!
//! ```no_run
//! use decouple_config::{CastKind, Resolver, Value, config};
//!
//! let debug = config("DEBUG", Some(Value::Bool(false)), CastKind::Boolean)?;
//! let port: i64 = Resolver::new().get("PORT", Some(8000))?;
//! # Ok::<(), decouple_config::ConfigError>(())
//! ```

mod cast;
pub mod constants;
mod error;
mod resolver;
pub mod store;
mod value;

pub use cast::{FromRaw, cast, cast_boolean};
pub use error::{CastError, ConfigError, SectionedParseError};
pub use resolver::{Resolver, config};
pub use store::{EnvironmentStore, FlatFileStore, SectionedFile, SectionedFileStore, Store, parse_flat};
pub use value::{CastKind, Resolution, Source, Value};
