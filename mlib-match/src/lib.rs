//! # mlib-match
//!
//! File-to-catalog reconciliation engine. Decides whether an audio file that
//! is not yet linked to the catalog corresponds to a known catalog track,
//! using a weighted multi-signal score over tags, file-derived fields and
//! metadata guessed from the file's path.
//!
//! Scoring is synchronous and side-effect free: every type here is
//! `Send + Sync`, so callers may score candidates in parallel.

pub mod calculators;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod services;

pub use calculators::{CalculatorType, ScoreCalculator, ScoreCalculatorChain};
pub use config::MatchConfig;
pub use error::{MatchError, MatchResult};
pub use models::{Album, Artist, PathInfo, ScoreResult, Track, UnmatchedTrack};
pub use services::{PathMetadataExtractor, TrackMatcher};

/// Build identification captured by build.rs
pub fn build_info() -> String {
    format!(
        "{} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    )
}
