//! Track position agreement
//!
//! Positions are either plain ordinals ("7", "07") or vinyl side tokens
//! ("A1", "B3").

use super::{Evaluation, NEUTRAL};
use crate::models::{PathInfo, Track, UnmatchedTrack};
use once_cell::sync::Lazy;
use regex::Regex;

static VINYL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z])([0-9]+)$").expect("valid regex"));

/// Ordinal gap beyond which positions are penalised
const MAX_NEUTRAL_GAP: u64 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackNumberCalculator;

impl TrackNumberCalculator {
    pub const PRIORITY: i32 = 20;

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, _path_info: &PathInfo) -> Evaluation {
        if track.album_with_artist().is_none() {
            return NEUTRAL;
        }

        let (Some(catalog), Some(file)) = (track.track_number.as_deref(), unmatched.track_number.as_deref())
        else {
            return NEUTRAL;
        };

        let catalog = catalog.trim();
        let file = file.trim();

        if catalog == file {
            return (15.0, Some("Track number match".to_string()));
        }

        if let (Some((side_a, pos_a)), Some((side_b, pos_b))) = (vinyl_position(catalog), vinyl_position(file)) {
            return if side_a == side_b {
                (
                    10.0,
                    Some(format!(
                        "Track number match on same side (difference: {})",
                        pos_a.abs_diff(pos_b)
                    )),
                )
            } else {
                NEUTRAL
            };
        }

        if let (Ok(a), Ok(b)) = (catalog.parse::<i64>(), file.parse::<i64>()) {
            let difference = a.abs_diff(b);
            if difference > MAX_NEUTRAL_GAP {
                return (
                    -5.0,
                    Some(format!("Track number mismatch (difference: {})", difference)),
                );
            }
        }

        NEUTRAL
    }
}

/// Side letter and position of a vinyl token
fn vinyl_position(value: &str) -> Option<(&str, u64)> {
    let captures = VINYL.captures(value)?;
    let side = captures.get(1)?.as_str();
    let position = captures.get(2)?.as_str().parse().ok()?;
    Some((side, position))
}
