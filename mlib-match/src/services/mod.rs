//! Matching services
//!
//! - `string_similarity`: edit-distance similarity helpers
//! - `path_metadata_extractor`: artist/album/year/track guesses from paths
//! - `track_matcher`: candidate ranking on top of the calculator chain

pub mod path_metadata_extractor;
pub mod string_similarity;
pub mod track_matcher;

pub use path_metadata_extractor::PathMetadataExtractor;
pub use string_similarity::BestMatch;
pub use track_matcher::{MatchAnalysis, TrackMatch, TrackMatcher, TrackSummary, UnmatchedSummary};
