//! Layer precedence and fallthrough.

use serial_test::serial;
use tempfile::TempDir;

use super::{ENV_FILE, INI_FILE};
use crate::constants::{FLAT_FILE_NAME, SECTIONED_FILE_NAME};
use crate::error::ConfigError;
use crate::resolver::Resolver;
use crate::test_util::write_file;
use crate::value::{CastKind, Source, Value};

fn all_layers(dir: &std::path::Path, flat: &str, sectioned: &str) -> Resolver {
    write_file(dir, FLAT_FILE_NAME, flat);
    write_file(dir, SECTIONED_FILE_NAME, sectioned);
    Resolver::in_dir(dir)
}

#[test]
#[serial]
fn test_environment_wins_over_both_files() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(temp_dir.path(), ENV_FILE, INI_FILE);

    temp_env::with_var("KeyOverrideByEnv", Some("This"), || {
        let resolution = resolver
            .resolve_with_source("KeyOverrideByEnv", None, CastKind::None)
            .unwrap();
        assert_eq!(resolution.value, Value::from("This"));
        assert_eq!(resolution.source, Source::Environment);
    });
}

#[test]
#[serial]
fn test_fallthrough_environment_then_flat_then_sectioned() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(
        temp_dir.path(),
        "Layered=flat\n",
        "[settings]\nLayered=sectioned\n",
    );

    temp_env::with_var("Layered", Some("environment"), || {
        assert_eq!(
            resolver.resolve("Layered", None, CastKind::None).unwrap(),
            Value::from("environment")
        );
    });

    temp_env::with_var_unset("Layered", || {
        let resolution = resolver
            .resolve_with_source("Layered", None, CastKind::None)
            .unwrap();
        assert_eq!(resolution.value, Value::from("flat"));
        assert_eq!(resolution.source, Source::FlatFile);

        std::fs::write(resolver.flat_file_path(), "Other=flat\n").unwrap();
        let resolution = resolver
            .resolve_with_source("Layered", None, CastKind::None)
            .unwrap();
        assert_eq!(resolution.value, Value::from("sectioned"));
        assert_eq!(resolution.source, Source::SectionedFile);
    });
}

#[test]
#[serial]
fn test_flat_file_wins_over_sectioned_file() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(temp_dir.path(), ENV_FILE, INI_FILE);

    temp_env::with_var_unset("KeyOverrideByEnv", || {
        let resolution = resolver
            .resolve_with_source("KeyOverrideByEnv", None, CastKind::None)
            .unwrap();
        assert_eq!(resolution.value, Value::from("NotThis"));
        assert_eq!(resolution.source, Source::FlatFile);
    });
}

#[test]
#[serial]
fn test_empty_environment_value_shadows_files() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(temp_dir.path(), ENV_FILE, INI_FILE);

    temp_env::with_var("KeyTrue", Some(""), || {
        let resolution = resolver
            .resolve_with_source("KeyTrue", None, CastKind::None)
            .unwrap();
        assert_eq!(resolution.value, Value::from(""));
        assert_eq!(resolution.source, Source::Environment);

        assert_eq!(
            resolver.resolve("KeyTrue", None, CastKind::Boolean).unwrap(),
            Value::Bool(false)
        );
    });
}

#[test]
#[serial]
fn test_environment_only_option() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(temp_dir.path(), ENV_FILE, INI_FILE);

    temp_env::with_var("KeyOnlyEnviron", Some(""), || {
        assert_eq!(
            resolver.resolve("KeyOnlyEnviron", None, CastKind::None).unwrap(),
            Value::from("")
        );
    });
}

#[test]
#[serial]
fn test_environment_values_cast() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = Resolver::in_dir(temp_dir.path());

    for (option, raw, expected) in [
        ("KeyFallback", "On", true),
        ("KeyTrue", "True", true),
        ("KeyOne", "1", true),
        ("KeyYes", "yes", true),
        ("KeyOn", "on", true),
        ("KeyOff", "OFF", false),
    ] {
        temp_env::with_var(option, Some(raw), || {
            assert_eq!(
                resolver.resolve(option, None, CastKind::None).unwrap(),
                Value::from(raw)
            );
            assert_eq!(
                resolver.resolve(option, None, CastKind::Boolean).unwrap(),
                Value::Bool(expected)
            );
        });
    }
}

#[test]
#[serial]
fn test_malformed_higher_layer_does_not_fall_through() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(
        temp_dir.path(),
        "Flag=maybe\n",
        "[settings]\nFlag=true\n",
    );

    temp_env::with_var_unset("Flag", || {
        let err = resolver
            .resolve("Flag", Some(Value::Bool(true)), CastKind::Boolean)
            .unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::InvalidValue {
                    origin: Source::FlatFile,
                    ..
                }
            ),
            "{err}"
        );
    });

    temp_env::with_var("Flag", Some("x"), || {
        let err = resolver.get::<bool>("Flag", Some(false)).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::InvalidValue {
                    origin: Source::Environment,
                    ..
                }
            ),
            "{err}"
        );
    });
}

#[test]
#[serial]
fn test_unreadable_flat_file_is_fatal_even_with_sectioned_value() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join(FLAT_FILE_NAME)).unwrap();
    write_file(temp_dir.path(), SECTIONED_FILE_NAME, INI_FILE);
    let resolver = Resolver::in_dir(temp_dir.path());

    let err = resolver
        .resolve("KeyTrue", Some(Value::from("fallback")), CastKind::None)
        .unwrap_err();
    assert!(matches!(err, ConfigError::FlatFileRead { .. }), "{err}");
}

#[test]
#[serial]
fn test_lookup_returns_raw_value_and_source() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = all_layers(temp_dir.path(), ENV_FILE, INI_FILE);

    assert_eq!(
        resolver.lookup("Interpolation").unwrap(),
        Some(("off".to_string(), Source::SectionedFile))
    );
    assert_eq!(
        resolver.lookup("NoInterpolation").unwrap(),
        Some(("%(KeyOff)s".to_string(), Source::FlatFile))
    );
    assert_eq!(resolver.lookup("UndefinedKey").unwrap(), None);
    assert!(matches!(
        resolver.lookup(""),
        Err(ConfigError::EmptyOption)
    ));
}
