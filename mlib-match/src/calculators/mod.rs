//! Per-signal score calculators
//!
//! Each calculator inspects one metadata dimension of a (catalog track,
//! unmatched file, parsed path) triple and returns a signed score delta plus
//! an optional human-readable reason. Calculators never fail: missing input
//! on either side yields [`NEUTRAL`]. A track without an album, or an album
//! without an artist, is neutral for every calculator.
//!
//! The set is closed, so it is modelled as the [`ScoreCalculator`] enum
//! rather than a trait object registry.

pub mod album;
pub mod artist;
pub mod chain;
pub mod duration;
pub mod strategy;
pub mod title;
pub mod track_number;
pub mod year;

pub use album::AlbumCalculator;
pub use artist::ArtistCalculator;
pub use chain::ScoreCalculatorChain;
pub use duration::DurationCalculator;
pub use title::TitleCalculator;
pub use track_number::TrackNumberCalculator;
pub use year::YearCalculator;

use crate::config::MatchConfig;
use crate::models::{PathInfo, Track, UnmatchedTrack};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score delta and optional reason from a single decision branch
pub type Evaluation = (f64, Option<String>);

/// No contribution
pub const NEUTRAL: Evaluation = (0.0, None);

/// Type tag identifying a calculator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CalculatorType {
    Title,
    Artist,
    Album,
    Duration,
    Year,
    TrackNumber,
    Null,
    /// Tag of a [`ScoreCalculator::Fixed`] calculator
    Custom(String),
}

impl CalculatorType {
    /// Every built-in tag, in default chain order
    pub const BUILTIN: [CalculatorType; 7] = [
        CalculatorType::Title,
        CalculatorType::Artist,
        CalculatorType::Album,
        CalculatorType::Duration,
        CalculatorType::Year,
        CalculatorType::TrackNumber,
        CalculatorType::Null,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CalculatorType::Title => "title",
            CalculatorType::Artist => "artist",
            CalculatorType::Album => "album",
            CalculatorType::Duration => "duration",
            CalculatorType::Year => "year",
            CalculatorType::TrackNumber => "trackNumber",
            CalculatorType::Null => "null",
            CalculatorType::Custom(tag) => tag,
        }
    }

    /// Look up a built-in tag (exact, case-sensitive)
    pub fn builtin(tag: &str) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|t| t.as_str() == tag)
    }
}

impl From<&str> for CalculatorType {
    fn from(tag: &str) -> Self {
        Self::builtin(tag).unwrap_or_else(|| CalculatorType::Custom(tag.to_string()))
    }
}

impl From<String> for CalculatorType {
    fn from(tag: String) -> Self {
        Self::builtin(&tag).unwrap_or(CalculatorType::Custom(tag))
    }
}

impl From<CalculatorType> for String {
    fn from(value: CalculatorType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CalculatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scoring signal
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreCalculator {
    Title(TitleCalculator),
    Artist(ArtistCalculator),
    Album(AlbumCalculator),
    Duration(DurationCalculator),
    Year(YearCalculator),
    TrackNumber(TrackNumberCalculator),
    /// Always neutral
    Null,
    /// Constant contribution, for manual adjustments and chain composition
    Fixed {
        tag: String,
        score: f64,
        reason: Option<String>,
    },
}

impl ScoreCalculator {
    /// The default signal set, configured from a snapshot
    ///
    /// `Null` terminates the list so every built-in tag is registered.
    pub fn defaults(config: &MatchConfig) -> Vec<ScoreCalculator> {
        vec![
            ScoreCalculator::Title(TitleCalculator::new(config.require_exact_title_match)),
            ScoreCalculator::Artist(ArtistCalculator),
            ScoreCalculator::Album(AlbumCalculator),
            ScoreCalculator::Duration(DurationCalculator::new(
                config.exact_duration_required,
                config.duration_tolerance_seconds,
            )),
            ScoreCalculator::Year(YearCalculator::new(config.year_tolerance)),
            ScoreCalculator::TrackNumber(TrackNumberCalculator),
            ScoreCalculator::Null,
        ]
    }

    pub fn fixed(tag: impl Into<String>, score: f64, reason: Option<&str>) -> Self {
        ScoreCalculator::Fixed {
            tag: tag.into(),
            score,
            reason: reason.map(str::to_string),
        }
    }

    /// Ordering weight; informational only, execution follows registration
    pub fn priority(&self) -> i32 {
        match self {
            ScoreCalculator::Title(_) => TitleCalculator::PRIORITY,
            ScoreCalculator::Artist(_) => ArtistCalculator::PRIORITY,
            ScoreCalculator::Album(_) => AlbumCalculator::PRIORITY,
            ScoreCalculator::Duration(_) => DurationCalculator::PRIORITY,
            ScoreCalculator::Year(_) => YearCalculator::PRIORITY,
            ScoreCalculator::TrackNumber(_) => TrackNumberCalculator::PRIORITY,
            ScoreCalculator::Null | ScoreCalculator::Fixed { .. } => 0,
        }
    }

    pub fn calculator_type(&self) -> CalculatorType {
        match self {
            ScoreCalculator::Title(_) => CalculatorType::Title,
            ScoreCalculator::Artist(_) => CalculatorType::Artist,
            ScoreCalculator::Album(_) => CalculatorType::Album,
            ScoreCalculator::Duration(_) => CalculatorType::Duration,
            ScoreCalculator::Year(_) => CalculatorType::Year,
            ScoreCalculator::TrackNumber(_) => CalculatorType::TrackNumber,
            ScoreCalculator::Null => CalculatorType::Null,
            ScoreCalculator::Fixed { tag, .. } => CalculatorType::from(tag.as_str()),
        }
    }

    /// Score and reason, decided together
    pub fn evaluate(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> Evaluation {
        match self {
            ScoreCalculator::Title(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::Artist(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::Album(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::Duration(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::Year(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::TrackNumber(c) => c.evaluate(track, unmatched, path_info),
            ScoreCalculator::Null => NEUTRAL,
            ScoreCalculator::Fixed { score, reason, .. } => (*score, reason.clone()),
        }
    }

    pub fn calculate_score(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> f64 {
        self.evaluate(track, unmatched, path_info).0
    }

    pub fn score_reason(&self, track: &Track, unmatched: &UnmatchedTrack, path_info: &PathInfo) -> Option<String> {
        self.evaluate(track, unmatched, path_info).1
    }
}
