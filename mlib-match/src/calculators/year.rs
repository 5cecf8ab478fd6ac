//! Release year agreement
//!
//! Compares the catalog album's release year with the year read from the
//! file's tags. The path-derived year is deliberately not consulted.

use super::{Evaluation, NEUTRAL};
use crate::config::DEFAULT_YEAR_TOLERANCE;
use crate::models::{PathInfo, Track, UnmatchedTrack};

#[derive(Debug, Clone, PartialEq)]
pub struct YearCalculator {
    /// Years per scoring step; values below 1 act as 1
    pub tolerance: i32,
}

impl Default for YearCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR_TOLERANCE)
    }
}

impl YearCalculator {
    pub const PRIORITY: i32 = 40;

    pub fn new(tolerance: i32) -> Self {
        Self { tolerance }
    }

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, _path_info: &PathInfo) -> Evaluation {
        let Some((album, _)) = track.album_with_artist() else {
            return NEUTRAL;
        };

        let (Some(catalog), Some(file)) = (album.release_year(), unmatched.year) else {
            return NEUTRAL;
        };

        if catalog == file {
            return (100.0, Some(format!("Exact year match: {}", file)));
        }

        let difference = catalog.abs_diff(file);
        let tolerance = self.tolerance.max(1).unsigned_abs();
        let steps = difference.div_ceil(tolerance);

        let score = match steps {
            1 => 80.0,
            2 => 60.0,
            3 => 40.0,
            _ => 20.0,
        };

        let reason = if steps <= 2 {
            format!("Close year match: {} year difference", difference)
        } else {
            format!("Year match: {} year difference", difference)
        };

        (score, Some(reason))
    }
}
