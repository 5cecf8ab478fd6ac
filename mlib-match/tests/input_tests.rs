//! Tests for loading CLI input records from JSON files

use mlib_match::input::{load_candidates, load_unmatched, parse_calculator_types};
use mlib_match::{CalculatorType, MatchError, TrackMatcher};
use std::fs;
use tempfile::TempDir;

const CANDIDATES: &str = r#"[
    {
        "id": "0b7c6d1e-3f4a-4b5c-8d9e-0f1a2b3c4d5e",
        "title": "Come Together",
        "track_number": "1",
        "duration": 259,
        "album": {
            "id": "1c8d7e2f-4a5b-4c6d-9e0f-1a2b3c4d5e6f",
            "title": "Abbey Road",
            "release_date": "1969-09-26",
            "artist": {
                "id": "2d9e8f3a-5b6c-4d7e-8f0a-2b3c4d5e6f7a",
                "name": "The Beatles"
            }
        }
    },
    {
        "id": "3e0f9a4b-6c7d-4e8f-9a1b-3c4d5e6f7a8b",
        "title": "Untitled"
    }
]"#;

const UNMATCHED: &str = r#"{
    "title": "Come Together",
    "artist": "The Beatles",
    "duration": 259,
    "year": 1969,
    "file_path": "/srv/Music/The Beatles/Abbey Road/01 Come Together.ogg"
}"#;

#[test]
fn test_load_and_score() {
    let temp_dir = TempDir::new().unwrap();
    let candidates_path = temp_dir.path().join("candidates.json");
    let unmatched_path = temp_dir.path().join("unmatched.json");
    fs::write(&candidates_path, CANDIDATES).unwrap();
    fs::write(&unmatched_path, UNMATCHED).unwrap();

    let candidates = load_candidates(&candidates_path).unwrap();
    let unmatched = load_unmatched(&unmatched_path).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(
        candidates[0].album.as_ref().and_then(|a| a.release_year()),
        Some(1969)
    );
    assert!(!unmatched.matched);
    assert_eq!(unmatched.album, None);

    let matches = TrackMatcher::default().find_best_matches(&unmatched, &candidates, 10);
    // The orphan candidate has no album and scores nothing
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].track.title.as_deref(), Some("Come Together"));
    assert_eq!(matches[0].score, 100.0);
}

#[test]
fn test_invalid_json_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_candidates(&path).unwrap_err();
    assert!(matches!(err, MatchError::InvalidRecords { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_wrong_shape_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("single.json");
    fs::write(&path, UNMATCHED).unwrap();

    // An object where an array of tracks is expected
    assert!(matches!(load_candidates(&path), Err(MatchError::InvalidRecords { .. })));
}

#[test]
fn test_type_list_parsing() {
    assert_eq!(
        parse_calculator_types("duration,year").unwrap(),
        vec![CalculatorType::Duration, CalculatorType::Year]
    );
    assert!(matches!(
        parse_calculator_types("duration,bpm"),
        Err(MatchError::UnknownCalculatorType(_))
    ));
}
