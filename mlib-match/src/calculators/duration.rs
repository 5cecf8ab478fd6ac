//! Duration agreement in whole seconds

use super::{Evaluation, NEUTRAL};
use crate::config::DEFAULT_DURATION_TOLERANCE_SECONDS;
use crate::models::{PathInfo, Track, UnmatchedTrack};

#[derive(Debug, Clone, PartialEq)]
pub struct DurationCalculator {
    /// Any difference scores zero when set
    pub exact_required: bool,
    /// Upper edge of the 30-point band
    pub tolerance_seconds: u32,
}

impl Default for DurationCalculator {
    fn default() -> Self {
        Self {
            exact_required: false,
            tolerance_seconds: DEFAULT_DURATION_TOLERANCE_SECONDS,
        }
    }
}

impl DurationCalculator {
    pub const PRIORITY: i32 = 50;

    pub fn new(exact_required: bool, tolerance_seconds: u32) -> Self {
        Self {
            exact_required,
            tolerance_seconds,
        }
    }

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, _path_info: &PathInfo) -> Evaluation {
        if track.album_with_artist().is_none() {
            return NEUTRAL;
        }

        let (Some(catalog), Some(file)) = (track.duration, unmatched.duration) else {
            return NEUTRAL;
        };

        if catalog == file {
            return (100.0, Some("Exact duration match".to_string()));
        }

        if self.exact_required {
            return (0.0, Some("Duration mismatch (exact match required)".to_string()));
        }

        let difference = catalog.abs_diff(file);
        let score = self.band_score(difference);

        let reason = if difference == 1 {
            format!("Close duration match: {}s vs {}s (1s difference)", file, catalog)
        } else {
            format!(
                "Duration match: {}s vs {}s ({}s difference)",
                file, catalog, difference
            )
        };

        (score, Some(reason))
    }

    fn band_score(&self, difference: u32) -> f64 {
        match difference {
            1 => 90.0,
            d if d <= 3 => 80.0,
            d if d <= 5 => 70.0,
            d if d <= 10 => 50.0,
            d if d <= self.tolerance_seconds => 30.0,
            _ => 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Artist};

    fn track(seconds: u32) -> Track {
        Track::new("Song", Album::new("Record", Artist::new("Band"))).with_duration(seconds)
    }

    fn score(calc: &DurationCalculator, catalog: u32, file: u32) -> f64 {
        calc.evaluate(&track(catalog), &UnmatchedTrack::new().with_duration(file), &PathInfo::default())
            .0
    }

    #[test]
    fn test_equal_durations_score_full_under_either_policy() {
        assert_eq!(score(&DurationCalculator::new(false, 30), 215, 215), 100.0);
        assert_eq!(score(&DurationCalculator::new(true, 30), 215, 215), 100.0);
    }

    #[test]
    fn test_exact_policy_zeroes_any_difference() {
        let calc = DurationCalculator::new(true, 30);
        let (score, reason) = calc.evaluate(
            &track(215),
            &UnmatchedTrack::new().with_duration(216),
            &PathInfo::default(),
        );
        assert_eq!(score, 0.0);
        assert_eq!(reason.as_deref(), Some("Duration mismatch (exact match required)"));
    }

    #[test]
    fn test_bands() {
        let calc = DurationCalculator::default();
        let cases = [(1, 90.0), (2, 80.0), (3, 80.0), (5, 70.0), (8, 50.0), (10, 50.0), (11, 30.0), (30, 30.0), (31, 10.0), (500, 10.0)];
        for (diff, expected) in cases {
            assert_eq!(score(&calc, 200, 200 + diff), expected, "difference {}", diff);
            assert_eq!(score(&calc, 200 + diff, 200), expected, "difference {}", diff);
        }
    }

    #[test]
    fn test_tolerance_window_is_configurable() {
        let calc = DurationCalculator::new(false, 60);
        assert_eq!(score(&calc, 200, 245), 30.0);
        assert_eq!(score(&calc, 200, 261), 10.0);
    }

    #[test]
    fn test_reasons() {
        let calc = DurationCalculator::default();
        let (_, close) = calc.evaluate(&track(200), &UnmatchedTrack::new().with_duration(201), &PathInfo::default());
        assert_eq!(close.as_deref(), Some("Close duration match: 201s vs 200s (1s difference)"));

        let (_, far) = calc.evaluate(&track(200), &UnmatchedTrack::new().with_duration(192), &PathInfo::default());
        assert_eq!(far.as_deref(), Some("Duration match: 192s vs 200s (8s difference)"));
    }

    #[test]
    fn test_missing_duration_is_neutral() {
        let calc = DurationCalculator::default();
        assert_eq!(calc.evaluate(&track(200), &UnmatchedTrack::new(), &PathInfo::default()), NEUTRAL);
    }
}
