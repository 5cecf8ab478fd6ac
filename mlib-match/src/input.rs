//! Loading records and options supplied on the command line

use crate::calculators::CalculatorType;
use crate::error::{MatchError, MatchResult};
use crate::models::{Track, UnmatchedTrack};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a JSON array of candidate catalog tracks
pub fn load_candidates(path: &Path) -> MatchResult<Vec<Track>> {
    let tracks: Vec<Track> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = tracks.len(), "Loaded candidate tracks");
    Ok(tracks)
}

/// Read a single unmatched file record
pub fn load_unmatched(path: &Path) -> MatchResult<UnmatchedTrack> {
    read_json(path)
}

/// Parse a comma-separated list of built-in calculator tags
///
/// Tags are case-sensitive; blanks between commas are ignored.
pub fn parse_calculator_types(list: &str) -> MatchResult<Vec<CalculatorType>> {
    list.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| CalculatorType::builtin(tag).ok_or_else(|| MatchError::UnknownCalculatorType(tag.to_string())))
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> MatchResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| MatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| MatchError::InvalidRecords {
        path: path.to_path_buf(),
        source,
    })
}
