//! Artist name agreement

use super::strategy::{first_match, NameEvidence, NameWeights};
use super::{Evaluation, NEUTRAL};
use crate::models::{PathInfo, Track, UnmatchedTrack};

const WEIGHTS: NameWeights = NameWeights {
    exact_score: 30.0,
    exact_reason: "Artist match",
    path_score: 20.0,
    path_reason: "Directory artist match",
    similarity_label: "Artist similarity",
    similarity_multiplier: 5.0,
    similarity_threshold: 0.8,
    threshold_inclusive: false,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArtistCalculator;

impl ArtistCalculator {
    pub const PRIORITY: i32 = 80;

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> Evaluation {
        let Some((_, artist)) = track.album_with_artist() else {
            return NEUTRAL;
        };

        let catalog = artist.name.as_deref().filter(|s| !s.is_empty());
        let file = unmatched.artist.as_deref().filter(|s| !s.is_empty());
        let (Some(catalog), Some(file)) = (catalog, file) else {
            return NEUTRAL;
        };

        let evidence = NameEvidence {
            catalog,
            file,
            path: Some(path_info.artist.as_str()).filter(|s| !s.is_empty()),
        };

        match first_match(&evidence, &WEIGHTS) {
            Some((score, reason)) => (score, Some(reason)),
            None => NEUTRAL,
        }
    }
}
