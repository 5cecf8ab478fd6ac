//! Catalog-side records (Artist, Album, Track)
//!
//! These arrive fully hydrated from the persistence layer. The engine only
//! reads them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some(name.into()),
        }
    }
}

/// Catalog album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub artist: Option<Artist>,
}

impl Album {
    pub fn new(title: impl Into<String>, artist: Artist) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            release_date: None,
            artist: Some(artist),
        }
    }

    /// Set release date to January 1st of `year`
    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_date = NaiveDate::from_ymd_opt(year, 1, 1);
        self
    }

    /// Release year, if a release date is known
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    pub fn artist_name(&self) -> Option<&str> {
        self.artist.as_ref().and_then(|a| a.name.as_deref())
    }
}

/// Catalog track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    /// Numeric ("7", "07") or vinyl-style ("A1") position
    #[serde(default)]
    pub track_number: Option<String>,
    /// Duration in whole seconds
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub album: Option<Album>,
}

impl Track {
    pub fn new(title: impl Into<String>, album: Album) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            track_number: None,
            duration: None,
            album: Some(album),
        }
    }

    pub fn with_track_number(mut self, track_number: impl Into<String>) -> Self {
        self.track_number = Some(track_number.into());
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Album and its artist, only when both are present
    ///
    /// Every calculator is neutral for a track missing either link.
    pub fn album_with_artist(&self) -> Option<(&Album, &Artist)> {
        let album = self.album.as_ref()?;
        let artist = album.artist.as_ref()?;
        Some((album, artist))
    }
}
