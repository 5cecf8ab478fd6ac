//! Error types for mlib-match
//!
//! The scoring engine itself never fails; these cover the edges where the
//! CLI reads records and options supplied by the user.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for mlib-match operations
pub type MatchResult<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Input file could not be read
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON for the expected record type
    #[error("Invalid records in {path}: {source}")]
    InvalidRecords {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `--types` named a tag no built-in calculator carries
    #[error("Unknown calculator type '{0}' (expected one of: title, artist, album, duration, year, trackNumber, null)")]
    UnknownCalculatorType(String),
}
