//! Tests for config file discovery and graceful degradation
//!
//! - Missing or broken TOML files never terminate the program
//! - Resolution priority: CLI argument → MLIB_CONFIG → platform default
//! - Typed environment overrides ignore invalid values
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate MLIB_* variables are marked with #[serial].

use mlib_common::config::{
    default_config_path, env_override, load_or_default, load_toml_config, resolve_config_path, TomlConfig,
    CONFIG_ENV_VAR,
};
use mlib_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config_path_is_under_mlib() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("mlib/config.toml"));
    }
}

#[test]
#[serial]
fn test_cli_argument_beats_environment() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolved = resolve_config_path(Some(PathBuf::from("/tmp/from-cli.toml").as_path()));
    assert_eq!(resolved, Some(PathBuf::from("/tmp/from-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_variable_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    assert_eq!(resolve_config_path(None), Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_environment_variable_ignored() {
    env::set_var(CONFIG_ENV_VAR, "   ");

    let resolved = resolve_config_path(None);
    assert_ne!(resolved, Some(PathBuf::from("   ")));
    // Only the platform default may be picked up, and only if it exists
    if let Some(path) = resolved {
        assert_eq!(Some(path.clone()), default_config_path());
        assert!(path.exists());
    }

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
file = "/var/log/mlib.log"

[association]
exact_duration_match = true
year_tolerance = 2
exact_title_match = true
duration_tolerance_seconds = 45
min_score = 70.5
library_markers = ["Music", "Musik"]
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/mlib.log")));
    assert_eq!(config.association.exact_duration_match, Some(true));
    assert_eq!(config.association.year_tolerance, Some(2));
    assert_eq!(config.association.exact_title_match, Some(true));
    assert_eq!(config.association.duration_tolerance_seconds, Some(45));
    assert_eq!(config.association.min_score, Some(70.5));
    assert_eq!(
        config.association.library_markers,
        Some(vec!["Music".to_string(), "Musik".to_string()])
    );
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_toml_config(&temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[association\nyear_tolerance = ").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_wrong_type_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("typed.toml");
    fs::write(&path, "[association]\nyear_tolerance = \"two\"\n").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_load_or_default_survives_broken_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "not = [valid").unwrap();

    let config = load_or_default(Some(&path));
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_load_or_default_survives_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_or_default(Some(&temp_dir.path().join("missing.toml")));
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_env_override_parses_typed_values() {
    env::set_var("MLIB_TEST_OVERRIDE_INT", " 3 ");
    env::set_var("MLIB_TEST_OVERRIDE_BOOL", "true");

    assert_eq!(env_override::<i32>("MLIB_TEST_OVERRIDE_INT"), Some(3));
    assert_eq!(env_override::<bool>("MLIB_TEST_OVERRIDE_BOOL"), Some(true));

    env::remove_var("MLIB_TEST_OVERRIDE_INT");
    env::remove_var("MLIB_TEST_OVERRIDE_BOOL");
}

#[test]
#[serial]
fn test_env_override_ignores_invalid_and_empty() {
    env::set_var("MLIB_TEST_OVERRIDE_INT", "three");
    env::set_var("MLIB_TEST_OVERRIDE_BOOL", "");

    assert_eq!(env_override::<i32>("MLIB_TEST_OVERRIDE_INT"), None);
    assert_eq!(env_override::<bool>("MLIB_TEST_OVERRIDE_BOOL"), None);
    assert_eq!(env_override::<f64>("MLIB_TEST_OVERRIDE_UNSET"), None);

    env::remove_var("MLIB_TEST_OVERRIDE_INT");
    env::remove_var("MLIB_TEST_OVERRIDE_BOOL");
}
