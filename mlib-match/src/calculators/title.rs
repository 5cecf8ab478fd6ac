//! Title similarity, the dominant signal

use super::{Evaluation, NEUTRAL};
use crate::models::{PathInfo, Track, UnmatchedTrack};
use crate::services::string_similarity::calculate_similarity;

/// Below this similarity the reason reports a mismatch instead
const MISMATCH_SIMILARITY: f64 = 0.3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleCalculator {
    /// Carried for callers; does not change the score
    pub require_exact_match: bool,
}

impl TitleCalculator {
    pub const PRIORITY: i32 = 100;

    pub fn new(require_exact_match: bool) -> Self {
        Self { require_exact_match }
    }

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, _path_info: &PathInfo) -> Evaluation {
        if track.album_with_artist().is_none() {
            return NEUTRAL;
        }

        let (Some(catalog), Some(file)) = (non_empty(&track.title), non_empty(&unmatched.title)) else {
            return NEUTRAL;
        };

        if catalog.trim().to_lowercase() == file.trim().to_lowercase() {
            return (100.0, Some("Exact title match".to_string()));
        }

        let similarity = calculate_similarity(catalog, file);
        let reason = if similarity < MISMATCH_SIMILARITY {
            "Title mismatch penalty (very low similarity)".to_string()
        } else {
            format!("Title similarity: {:.1}%", similarity * 100.0)
        };

        (similarity * 100.0, Some(reason))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
