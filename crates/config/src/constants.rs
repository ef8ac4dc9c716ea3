//! Centralized constants for option resolution.
//!
//! Conventional file names and the recognized settings section live here so
//! the stores and the resolver agree on them.

// =============================================================================
// File Locations
// =============================================================================

/// Conventional name of the flat key/value definitions file.
pub const FLAT_FILE_NAME: &str = ".env";

/// Conventional name of the sectioned settings file.
pub const SECTIONED_FILE_NAME: &str = "settings.ini";

/// The only section of the sectioned file that options are read from.
pub const SETTINGS_SECTION: &str = "settings";

/// Header that names the default area explicitly. Its keys join the ones
/// written before the first header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

// =============================================================================
// Interpolation
// =============================================================================

/// Maximum nesting depth when expanding `%(name)s` references.
pub const MAX_INTERPOLATION_DEPTH: usize = 99;

/// Expansion stops before a value would grow past this many bytes.
pub const MAX_INTERPOLATED_LEN: usize = 64 * 1024;
