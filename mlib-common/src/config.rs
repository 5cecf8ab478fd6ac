//! Configuration loading and config file resolution
//!
//! Bootstrap configuration lives in a single TOML file. Resolution priority
//! for the file itself:
//! 1. Command-line argument (highest priority)
//! 2. `MLIB_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/mlib/config.toml` on Linux)
//! 4. Built-in defaults (no file)
//!
//! A missing or unreadable file never terminates the program: callers get a
//! warning in the log and the compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MLIB_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Track association policy knobs (optional)
    #[serde(default)]
    pub association: AssociationSection,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[association]` section
///
/// Every key is optional; absent keys resolve to built-in defaults in the
/// matcher's configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationSection {
    /// Any duration difference scores zero when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_duration_match: Option<bool>,

    /// Size of one year-difference step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_tolerance: Option<i32>,

    /// Reject candidates whose title is not an exact match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_title_match: Option<bool>,

    /// Upper edge (seconds) of the last non-minimal duration band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_tolerance_seconds: Option<u32>,

    /// Minimum score for a candidate to be accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,

    /// Directory names marking the root of a music library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_markers: Option<Vec<String>>,
}

/// Resolve which config file to read, if any
///
/// Returns `None` when neither the CLI nor the environment names a file and
/// no file exists at the platform default location.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|p| p.exists())
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mlib").join("config.toml"))
}

/// Load and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the bootstrap config, falling back to defaults on any problem
pub fn load_or_default(cli_arg: Option<&Path>) -> TomlConfig {
    let Some(path) = resolve_config_path(cli_arg) else {
        debug!("No config file found, using built-in defaults");
        return TomlConfig::default();
    };

    match load_toml_config(&path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        Err(e) => {
            warn!("{}. Using built-in defaults.", e);
            TomlConfig::default()
        }
    }
}

/// Write a config file atomically (temp file + rename)
///
/// On Unix the file is created with 0600 permissions.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(Error::Io(e));
    }

    debug!(path = %path.display(), "Wrote configuration");
    Ok(())
}

/// Read a typed override from an environment variable
///
/// Unset or empty variables yield `None`. Values that fail to parse are
/// logged and ignored.
pub fn env_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value '{}' for {}", raw, name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.association.year_tolerance.is_none());
    }

    #[test]
    fn test_partial_association_section() {
        let config: TomlConfig = toml::from_str(
            r#"
            [association]
            exact_duration_match = true
            library_markers = ["Music", "Audio"]
            "#,
        )
        .unwrap();

        assert_eq!(config.association.exact_duration_match, Some(true));
        assert_eq!(
            config.association.library_markers,
            Some(vec!["Music".to_string(), "Audio".to_string()])
        );
        assert!(config.association.min_score.is_none());
    }

    #[test]
    fn test_cli_arg_has_priority() {
        let path = resolve_config_path(Some(Path::new("/tmp/explicit.toml")));
        assert_eq!(path, Some(PathBuf::from("/tmp/explicit.toml")));
    }
}
