//! Metadata guessed from a file's location on disk

use serde::{Deserialize, Serialize};

/// Result of parsing a file path
///
/// Transient: recomputed for every match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    /// Artist candidate (always present, possibly empty)
    pub artist: String,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub track_number: Option<String>,
    /// Directory segment names, outermost first, filename excluded
    pub directories: Vec<String>,
}

impl Default for PathInfo {
    fn default() -> Self {
        Self {
            artist: String::new(),
            album: None,
            year: None,
            track_number: None,
            directories: vec![String::new()],
        }
    }
}
