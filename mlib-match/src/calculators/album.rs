//! Album title agreement

use super::strategy::{first_match, NameEvidence, NameWeights};
use super::{Evaluation, NEUTRAL};
use crate::models::{PathInfo, Track, UnmatchedTrack};

const WEIGHTS: NameWeights = NameWeights {
    exact_score: 25.0,
    exact_reason: "Exact album match",
    path_score: 15.0,
    path_reason: "Directory album match",
    similarity_label: "Album similarity",
    similarity_multiplier: 5.0,
    similarity_threshold: 0.8,
    threshold_inclusive: true,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlbumCalculator;

impl AlbumCalculator {
    pub const PRIORITY: i32 = 60;

    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> Evaluation {
        let Some((album, _)) = track.album_with_artist() else {
            return NEUTRAL;
        };

        let catalog = album.title.as_deref().filter(|s| !s.is_empty());
        let file = unmatched.album.as_deref().filter(|s| !s.is_empty());
        let (Some(catalog), Some(file)) = (catalog, file) else {
            return NEUTRAL;
        };

        let catalog = clean_title(catalog);
        let file = clean_title(file);

        let evidence = NameEvidence {
            catalog: &catalog,
            file: &file,
            path: path_info.album.as_deref(),
        };

        match first_match(&evidence, &WEIGHTS) {
            Some((score, reason)) => (score, Some(reason)),
            None => NEUTRAL,
        }
    }
}

/// Drop `:` and `-`, collapse the doubled spaces that leaves, trim
fn clean_title(title: &str) -> String {
    let stripped = title.replace([':', '-'], "");
    stripped.replace("  ", " ").trim().to_string()
}
