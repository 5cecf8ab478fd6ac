//! Configuration resolution for mlib-match
//!
//! Provides two-tier resolution with ENV → TOML priority, falling back to
//! built-in defaults. The resolved values are frozen into a [`MatchConfig`]
//! snapshot once per batch and injected into the calculator chain, so
//! scoring never reads ambient state.

use mlib_common::config::{env_override, AssociationSection, TomlConfig};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::services::path_metadata_extractor::DEFAULT_LIBRARY_MARKER;

pub const ENV_EXACT_DURATION_MATCH: &str = "MLIB_EXACT_DURATION_MATCH";
pub const ENV_YEAR_TOLERANCE: &str = "MLIB_YEAR_TOLERANCE";
pub const ENV_EXACT_TITLE_MATCH: &str = "MLIB_EXACT_TITLE_MATCH";
pub const ENV_MIN_SCORE: &str = "MLIB_MIN_SCORE";

pub const DEFAULT_YEAR_TOLERANCE: i32 = 1;
pub const DEFAULT_DURATION_TOLERANCE_SECONDS: u32 = 30;
pub const DEFAULT_MIN_SCORE: f64 = 85.0;

/// Immutable association policy snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Any duration difference scores zero
    pub exact_duration_required: bool,
    /// Size of one year-difference step (values below 1 act as 1)
    pub year_tolerance: i32,
    /// Caller-level gate: reject candidates without an exact title
    pub require_exact_title_match: bool,
    /// Upper edge of the 30-point duration band
    pub duration_tolerance_seconds: u32,
    /// Acceptance threshold for [`crate::TrackMatcher::best_acceptable_match`]
    pub min_score: f64,
    /// Directory names marking a library root
    pub library_markers: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            exact_duration_required: false,
            year_tolerance: DEFAULT_YEAR_TOLERANCE,
            require_exact_title_match: false,
            duration_tolerance_seconds: DEFAULT_DURATION_TOLERANCE_SECONDS,
            min_score: DEFAULT_MIN_SCORE,
            library_markers: vec![DEFAULT_LIBRARY_MARKER.to_string()],
        }
    }
}

impl MatchConfig {
    /// Resolve a snapshot from environment overrides and a loaded TOML config
    ///
    /// **Priority:** ENV → TOML → default
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        let section = &toml_config.association;
        let defaults = Self::default();

        let config = Self {
            exact_duration_required: resolve_value(
                "exact_duration_match",
                ENV_EXACT_DURATION_MATCH,
                section.exact_duration_match,
                defaults.exact_duration_required,
            ),
            year_tolerance: resolve_value(
                "year_tolerance",
                ENV_YEAR_TOLERANCE,
                section.year_tolerance,
                defaults.year_tolerance,
            ),
            require_exact_title_match: resolve_value(
                "exact_title_match",
                ENV_EXACT_TITLE_MATCH,
                section.exact_title_match,
                defaults.require_exact_title_match,
            ),
            duration_tolerance_seconds: section
                .duration_tolerance_seconds
                .unwrap_or(defaults.duration_tolerance_seconds),
            min_score: resolve_value("min_score", ENV_MIN_SCORE, section.min_score, defaults.min_score),
            library_markers: section
                .library_markers
                .clone()
                .filter(|markers| !markers.is_empty())
                .unwrap_or(defaults.library_markers),
        };

        debug!(config = ?config, "Resolved association configuration");
        config
    }

    /// Convert back into a TOML `[association]` section (every key explicit)
    pub fn to_section(&self) -> AssociationSection {
        AssociationSection {
            exact_duration_match: Some(self.exact_duration_required),
            year_tolerance: Some(self.year_tolerance),
            exact_title_match: Some(self.require_exact_title_match),
            duration_tolerance_seconds: Some(self.duration_tolerance_seconds),
            min_score: Some(self.min_score),
            library_markers: Some(self.library_markers.clone()),
        }
    }
}

fn resolve_value<T>(key: &str, env_name: &str, toml_value: Option<T>, default: T) -> T
where
    T: FromStr + Display + PartialEq + Copy,
{
    let env_value = env_override::<T>(env_name);

    match (env_value, toml_value) {
        (Some(env), Some(toml)) => {
            if env != toml {
                warn!(
                    "{} set in both {} ({}) and TOML ({}). Using environment (highest priority).",
                    key, env_name, env, toml
                );
            }
            env
        }
        (Some(env), None) => env,
        (None, Some(toml)) => toml,
        (None, None) => default,
    }
}
