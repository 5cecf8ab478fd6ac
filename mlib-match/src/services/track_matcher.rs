//! Candidate ranking for unmatched files
//!
//! Wraps the calculator chain and the path extractor: parses the file's
//! path once, scores every candidate catalog track and ranks the results.
//! Chain totals routinely exceed 100 when several signals agree, so caller
//! facing scores are clamped to `[0, 100]`.

use crate::calculators::{CalculatorType, ScoreCalculatorChain};
use crate::config::MatchConfig;
use crate::models::{PathInfo, Track, UnmatchedTrack};
use crate::services::path_metadata_extractor::PathMetadataExtractor;
use crate::services::string_similarity::{calculate_similarity, DEFAULT_SIMILARITY_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Candidates at or below this score are dropped from rankings
const MIN_SCORE_THRESHOLD: f64 = 0.1;

/// Upper bound of caller-facing scores
pub const MAX_SCORE: f64 = 100.0;

/// Default number of ranked candidates
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMatch {
    pub track: Track,
    pub score: f64,
    /// Reasons joined with ", "
    pub reason: String,
}

/// Catalog side of a [`MatchAnalysis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub title: Option<String>,
    pub track_number: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
}

/// File side of a [`MatchAnalysis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedSummary {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Full breakdown of one candidate's score, for manual review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    /// Chain total capped at [`MAX_SCORE`] (not floored)
    pub total_score: f64,
    pub reasons: Vec<String>,
    pub path_info: PathInfo,
    pub available_types: Vec<CalculatorType>,
    pub track: TrackSummary,
    pub unmatched: UnmatchedSummary,
}

/// Ranks catalog tracks against unmatched files
#[derive(Debug, Clone)]
pub struct TrackMatcher {
    chain: ScoreCalculatorChain,
    extractor: PathMetadataExtractor,
    config: MatchConfig,
}

impl TrackMatcher {
    /// Build the default chain and extractor from a snapshot
    pub fn new(config: MatchConfig) -> Self {
        Self {
            chain: ScoreCalculatorChain::from_config(&config),
            extractor: PathMetadataExtractor::new(config.library_markers.clone()),
            config,
        }
    }

    /// Use a custom chain (e.g. fixed calculators) with the given snapshot
    pub fn with_chain(chain: ScoreCalculatorChain, config: MatchConfig) -> Self {
        Self {
            chain,
            extractor: PathMetadataExtractor::new(config.library_markers.clone()),
            config,
        }
    }

    pub fn chain(&self) -> &ScoreCalculatorChain {
        &self.chain
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Parse the unmatched file's path (missing path parses as empty)
    pub fn path_info(&self, unmatched: &UnmatchedTrack) -> PathInfo {
        self.extractor.extract(unmatched.file_path.as_deref().unwrap_or(""))
    }

    /// Chain score clamped to `[0, 100]`
    ///
    /// Penalties still lower the score before clamping.
    pub fn calculate_match_score(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> f64 {
        self.chain
            .execute_chain(track, unmatched, path_info)
            .score
            .clamp(0.0, MAX_SCORE)
    }

    pub fn match_reason(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> String {
        let result = self.chain.execute_chain(track, unmatched, path_info);
        join_reasons(&result.reasons)
    }

    /// Rank candidates for an unmatched file, best first
    ///
    /// Candidates scoring 0.1 or less are dropped. Ordering uses the raw
    /// chain total, so candidates that all clamp to 100 stay distinguishable;
    /// equal totals keep candidate order.
    pub fn find_best_matches(&self, unmatched: &UnmatchedTrack, candidates: &[Track], limit: usize) -> Vec<TrackMatch> {
        let path_info = self.path_info(unmatched);

        let mut ranked: Vec<(f64, TrackMatch)> = candidates
            .iter()
            .filter_map(|track| {
                let result = self.chain.execute_chain(track, unmatched, &path_info);
                let score = result.score.clamp(0.0, MAX_SCORE);
                (score > MIN_SCORE_THRESHOLD).then(|| {
                    let candidate = TrackMatch {
                        track: track.clone(),
                        score,
                        reason: join_reasons(&result.reasons),
                    };
                    (result.score, candidate)
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut matches: Vec<TrackMatch> = ranked.into_iter().map(|(_, m)| m).collect();
        matches.truncate(limit);

        tracing::debug!(
            unmatched_id = %unmatched.id,
            candidates = candidates.len(),
            matches = matches.len(),
            best_score = matches.first().map(|m| m.score),
            "Ranked candidates"
        );

        matches
    }

    /// Best candidate that clears the acceptance threshold
    ///
    /// With `require_exact_title_match` set, candidates whose title differs
    /// (ignoring case and surrounding whitespace) are rejected outright.
    pub fn best_acceptable_match(&self, unmatched: &UnmatchedTrack, candidates: &[Track]) -> Option<TrackMatch> {
        let accepted = self
            .find_best_matches(unmatched, candidates, candidates.len())
            .into_iter()
            .filter(|m| m.score >= self.config.min_score)
            .find(|m| !self.config.require_exact_title_match || titles_equal(&m.track, unmatched));

        match &accepted {
            Some(m) => tracing::debug!(
                unmatched_id = %unmatched.id,
                track_id = %m.track.id,
                score = m.score,
                "Accepted match"
            ),
            None => tracing::debug!(
                unmatched_id = %unmatched.id,
                min_score = self.config.min_score,
                "No acceptable match"
            ),
        }

        accepted
    }

    /// Whether two catalog tracks likely describe the same recording
    ///
    /// Averages artist, album and title similarity. Tracks missing an album
    /// or artist never compare as similar.
    pub fn are_tracks_similar(&self, a: &Track, b: &Track, threshold: Option<f64>) -> bool {
        let threshold = threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);

        let (Some((album_a, artist_a)), Some((album_b, artist_b))) = (a.album_with_artist(), b.album_with_artist())
        else {
            return false;
        };

        let artist = calculate_similarity(
            artist_a.name.as_deref().unwrap_or(""),
            artist_b.name.as_deref().unwrap_or(""),
        );
        let album = calculate_similarity(
            album_a.title.as_deref().unwrap_or(""),
            album_b.title.as_deref().unwrap_or(""),
        );
        let title = calculate_similarity(a.title.as_deref().unwrap_or(""), b.title.as_deref().unwrap_or(""));

        (artist + album + title) / 3.0 >= threshold
    }

    /// Restricted-chain score, capped at 100 but not floored
    pub fn calculate_match_score_with_types(
        &self,
        track: &Track,
        unmatched: &UnmatchedTrack,
        path_info: &PathInfo,
        types: &[CalculatorType],
    ) -> f64 {
        self.chain
            .execute_chain_with_types(track, unmatched, path_info, types)
            .score
            .min(MAX_SCORE)
    }

    pub fn detailed_match_analysis(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> MatchAnalysis {
        let result = self.chain.execute_chain(track, unmatched, path_info);

        MatchAnalysis {
            total_score: result.score.min(MAX_SCORE),
            reasons: result.reasons,
            path_info: path_info.clone(),
            available_types: self.chain.available_types(),
            track: TrackSummary {
                title: track.title.clone(),
                track_number: track.track_number.clone(),
                album: track.album.as_ref().and_then(|a| a.title.clone()),
                artist: track.album.as_ref().and_then(|a| a.artist_name()).map(str::to_string),
            },
            unmatched: UnmatchedSummary {
                title: unmatched.title.clone(),
                artist: unmatched.artist.clone(),
                album: unmatched.album.clone(),
            },
        }
    }
}

impl Default for TrackMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

fn join_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        "No significant matches found".to_string()
    } else {
        reasons.join(", ")
    }
}

fn titles_equal(track: &Track, unmatched: &UnmatchedTrack) -> bool {
    match (track.title.as_deref(), unmatched.title.as_deref()) {
        (Some(a), Some(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}
