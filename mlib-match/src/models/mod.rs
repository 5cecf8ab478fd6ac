//! Data models for mlib-match
//!
//! Catalog records come from the persistence layer; `UnmatchedTrack` is the
//! file-side evidence; `PathInfo` and `ScoreResult` are transient.

pub mod catalog;
pub mod path_info;
pub mod score_result;
pub mod unmatched_track;

pub use catalog::{Album, Artist, Track};
pub use path_info::PathInfo;
pub use score_result::ScoreResult;
pub use unmatched_track::UnmatchedTrack;
