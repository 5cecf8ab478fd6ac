//! Heuristic metadata extraction from file paths
//!
//! Libraries are usually laid out as `<root>/Music/<Artist>/<Album>/<NN Title>`.
//! The extractor reads that convention back out of a raw path string. It is
//! pure string parsing: no filesystem access, and it never fails. Paths that
//! do not follow the convention still produce best-effort (possibly
//! meaningless) tokens.

use crate::models::PathInfo;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default library root marker
pub const DEFAULT_LIBRARY_MARKER: &str = "Music";

/// Year as the leading token: "1999 Album", "1999 - Album"
static LEADING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})[\s[:punct:]]").expect("valid regex"));

/// Year as the trailing token: "Album 1999", "Album-1999"
static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s[:punct:]]([0-9]{4})$").expect("valid regex"));

/// Leading track token: "01 ", "7.", "A1-"
static TRACK_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][0-9]+|[0-9]{1,3})[\s.\-]").expect("valid regex"));

/// Path parser for artist/album/year/track-number guesses
#[derive(Debug, Clone)]
pub struct PathMetadataExtractor {
    library_markers: Vec<String>,
}

impl Default for PathMetadataExtractor {
    fn default() -> Self {
        Self::new(vec![DEFAULT_LIBRARY_MARKER.to_string()])
    }
}

impl PathMetadataExtractor {
    /// Create extractor recognising the given library root names
    ///
    /// Markers are compared case-insensitively.
    pub fn new(library_markers: Vec<String>) -> Self {
        Self {
            library_markers: library_markers
                .into_iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Parse a raw path
    ///
    /// `/` and `\` are both separators. Empty segments are dropped, so
    /// `//server/share/x` and `/server/share/x` parse identically.
    pub fn extract(&self, path: &str) -> PathInfo {
        let segments: Vec<&str> = path.split(['/', '\\']).filter(|s| !s.is_empty()).collect();

        let (file_name, dirs) = match segments.split_last() {
            Some((file_name, dirs)) => (Some(*file_name), dirs),
            None => (None, &[][..]),
        };

        let (artist, album_candidate) = self.artist_and_album(dirs);

        let (album, year) = match album_candidate {
            Some(candidate) => {
                let (album, year) = split_year(candidate);
                (Some(album), year)
            }
            None => (None, None),
        };

        let directories = if dirs.is_empty() {
            vec![String::new()]
        } else {
            dirs.iter().map(|d| d.to_string()).collect()
        };

        let info = PathInfo {
            artist: artist.to_string(),
            album,
            year,
            track_number: file_name.and_then(track_number_from_file_name),
            directories,
        };

        tracing::trace!(
            path = %path,
            artist = %info.artist,
            album = ?info.album,
            year = ?info.year,
            track_number = ?info.track_number,
            "Parsed path metadata"
        );

        info
    }

    pub fn extract_artist(&self, path: &str) -> String {
        self.extract(path).artist
    }

    pub fn extract_album(&self, path: &str) -> Option<String> {
        self.extract(path).album
    }

    pub fn extract_year(&self, path: &str) -> Option<i32> {
        self.extract(path).year
    }

    /// Only the file name is inspected
    pub fn extract_track_number(&self, path: &str) -> Option<String> {
        path.split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .last()
            .and_then(track_number_from_file_name)
    }

    pub fn has_year(&self, path: &str) -> bool {
        self.extract_year(path).is_some()
    }

    pub fn directory_structure(&self, path: &str) -> Vec<String> {
        self.extract(path).directories
    }

    /// Artist and album candidates from the directory segments
    ///
    /// The two segments after the first library marker win. Without a
    /// marker (or with nothing after it) the first two segments are used.
    fn artist_and_album<'a>(&self, dirs: &[&'a str]) -> (&'a str, Option<&'a str>) {
        let anchored = dirs
            .iter()
            .position(|d| self.is_library_marker(d))
            .map(|i| &dirs[i + 1..])
            .filter(|rest| !rest.is_empty());

        let parts = anchored.unwrap_or(dirs);
        let artist = parts.first().copied().unwrap_or("");
        let album = parts.get(1).copied();

        (artist, album)
    }

    fn is_library_marker(&self, segment: &str) -> bool {
        let segment = segment.to_lowercase();
        self.library_markers.iter().any(|m| *m == segment)
    }
}

/// Split a leading or trailing year off an album candidate
///
/// The leading position is tried first. A candidate that would be empty
/// once the year is removed keeps its text and gets no year.
fn split_year(candidate: &str) -> (String, Option<i32>) {
    let found = LEADING_YEAR
        .captures(candidate)
        .and_then(|c| c.get(1))
        .map(|m| (m.as_str(), &candidate[m.end()..]))
        .or_else(|| {
            TRAILING_YEAR
                .captures(candidate)
                .and_then(|c| c.get(1))
                .map(|m| (m.as_str(), &candidate[..m.start()]))
        });

    if let Some((digits, rest)) = found {
        let rest = trim_separators(rest);
        if let (false, Ok(year)) = (rest.is_empty(), digits.parse::<i32>()) {
            return (rest.to_string(), Some(year));
        }
    }

    (candidate.to_string(), None)
}

fn trim_separators(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.' | ','))
}

fn track_number_from_file_name(file_name: &str) -> Option<String> {
    TRACK_NUMBER
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PathMetadataExtractor {
        PathMetadataExtractor::default()
    }

    #[test]
    fn test_standard_library_layout() {
        let info = extractor().extract("/home/user/Music/Artist Name/1999 Album Name/01 Track Title.mp3");

        assert_eq!(info.artist, "Artist Name");
        assert_eq!(info.album.as_deref(), Some("Album Name"));
        assert_eq!(info.year, Some(1999));
        assert_eq!(info.track_number.as_deref(), Some("01"));
        assert_eq!(
            info.directories,
            vec!["home", "user", "Music", "Artist Name", "1999 Album Name"]
        );
    }

    #[test]
    fn test_empty_and_root_paths() {
        for path in ["", "/", "//", "\\"] {
            let info = extractor().extract(path);
            assert_eq!(info, PathInfo::default(), "path {:?}", path);
            assert_eq!(info.artist, "");
            assert_eq!(info.directories, vec![String::new()]);
        }
    }

    #[test]
    fn test_network_path_matches_absolute() {
        let a = extractor().extract("//server/share/Music/Band/Record/01 Song.flac");
        let b = extractor().extract("/server/share/Music/Band/Record/01 Song.flac");
        assert_eq!(a, b);
        assert_eq!(a.artist, "Band");
    }

    #[test]
    fn test_backslash_separators() {
        let info = extractor().extract("C:\\Users\\me\\Music\\Band\\Record 2004\\B2 Song.mp3");
        assert_eq!(info.artist, "Band");
        assert_eq!(info.album.as_deref(), Some("Record"));
        assert_eq!(info.year, Some(2004));
        assert_eq!(info.track_number.as_deref(), Some("B2"));
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let info = extractor().extract("/data/music/Band/Record/03 - Song.mp3");
        assert_eq!(info.artist, "Band");
        assert_eq!(info.album.as_deref(), Some("Record"));
        assert_eq!(info.track_number.as_deref(), Some("03"));
    }

    #[test]
    fn test_custom_markers() {
        let extractor = PathMetadataExtractor::new(vec!["Audio".to_string()]);
        let info = extractor.extract("/srv/audio/Band/Record/01 Song.mp3");
        assert_eq!(info.artist, "Band");
        assert_eq!(info.album.as_deref(), Some("Record"));
    }

    #[test]
    fn test_fallback_without_marker() {
        let info = extractor().extract("/home/user/Band/Record/01 Song.mp3");
        assert_eq!(info.artist, "home");
        assert_eq!(info.album.as_deref(), Some("user"));
    }

    #[test]
    fn test_fallback_when_marker_is_last_directory() {
        let info = extractor().extract("/home/Music/01 Song.mp3");
        assert_eq!(info.artist, "home");
        assert_eq!(info.album.as_deref(), Some("Music"));
    }

    #[test]
    fn test_only_artist_after_marker() {
        let info = extractor().extract("/Music/Band/01 Song.mp3");
        assert_eq!(info.artist, "Band");
        assert_eq!(info.album, None);
        assert_eq!(info.year, None);
    }

    #[test]
    fn test_year_position_rules() {
        assert_eq!(split_year("Album Name 1999"), ("Album Name".to_string(), Some(1999)));
        assert_eq!(split_year("1999 - Album Name"), ("Album Name".to_string(), Some(1999)));
        assert_eq!(split_year("Album-2001"), ("Album".to_string(), Some(2001)));
        // Mid-string digits are part of the title
        assert_eq!(split_year("Summer 1969 Songs"), ("Summer 1969 Songs".to_string(), None));
        // Five digits are not a year
        assert_eq!(split_year("Album 19999"), ("Album 19999".to_string(), None));
        // Nothing would remain
        assert_eq!(split_year("1999"), ("1999".to_string(), None));
    }

    #[test]
    fn test_leading_year_wins_over_trailing() {
        assert_eq!(split_year("1999 Live 2001"), ("Live 2001".to_string(), Some(1999)));
    }

    #[test]
    fn test_track_number_forms() {
        let e = extractor();
        assert_eq!(e.extract_track_number("/a/01 Song.mp3").as_deref(), Some("01"));
        assert_eq!(e.extract_track_number("/a/7.Song.mp3").as_deref(), Some("7"));
        assert_eq!(e.extract_track_number("/a/101-Song.mp3").as_deref(), Some("101"));
        assert_eq!(e.extract_track_number("/a/A1 Side Opener.mp3").as_deref(), Some("A1"));
        assert_eq!(e.extract_track_number("/a/Song.mp3"), None);
        assert_eq!(e.extract_track_number("/a/2024 Song.mp3"), None);
        assert_eq!(e.extract_track_number("/a/a1 Song.mp3"), None);
        assert_eq!(e.extract_track_number(""), None);
    }

    #[test]
    fn test_convenience_accessors() {
        let e = extractor();
        let path = "/Music/Band/Record (Deluxe) 2010/02 Song.mp3";
        assert_eq!(e.extract_artist(path), "Band");
        assert_eq!(e.extract_album(path).as_deref(), Some("Record (Deluxe)"));
        assert_eq!(e.extract_year(path), Some(2010));
        assert!(e.has_year(path));
        assert!(!e.has_year("/Music/Band/Record/02 Song.mp3"));
        assert_eq!(e.directory_structure(path), vec!["Music", "Band", "Record (Deluxe) 2010"]);
    }
}
