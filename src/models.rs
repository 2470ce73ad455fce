//! Data structures and types for FlixTUI
//!
//! Shared models used across the application:
//! - **Catalog**: media summaries from the trending and search feeds
//! - **Seasons**: season and episode listings for TV titles
//! - **Preferences**: the persisted theme flag

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// TMDB genre id for "Animation"
pub const ANIMATION_GENRE_ID: u32 = 16;

/// Original-language code used by the anime feed filter
pub const JAPANESE_LANGUAGE: &str = "ja";

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Media kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the TMDB API (`movie` / `tv`)
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Tv => write!(f, "TV Show"),
        }
    }
}

/// Minimal metadata record for a movie or TV title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSummary {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: f32,
    pub original_language: String,
    pub genre_ids: BTreeSet<u32>,
}

impl MediaSummary {
    /// Bare summary with only the identifying fields set
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            first_air_date: None,
            vote_average: 0.0,
            original_language: String::new(),
            genre_ids: BTreeSet::new(),
        }
    }

    pub fn is_tv(&self) -> bool {
        self.kind == MediaKind::Tv
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn has_backdrop(&self) -> bool {
        self.backdrop_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Poster or backdrop present
    pub fn has_artwork(&self) -> bool {
        self.has_poster() || self.has_backdrop()
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Release date for movies, first-air date for TV
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }

    /// Year taken from the release or first-air date
    pub fn year(&self) -> Option<u16> {
        self.date().and_then(extract_year)
    }

    /// Japanese-language animation
    pub fn is_anime(&self) -> bool {
        self.original_language == JAPANESE_LANGUAGE && self.genre_ids.contains(&ANIMATION_GENRE_ID)
    }
}

impl fmt::Display for MediaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind)
    }
}

// =============================================================================
// Season / Episode Models
// =============================================================================

/// One season entry of a TV title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub season_number: u16,
    pub episode_count: u16,
    pub name: Option<String>,
}

impl Season {
    pub fn new(season_number: u16, episode_count: u16) -> Self {
        Self {
            season_number,
            episode_count,
            name: None,
        }
    }

    /// Specials (season 0) and empty seasons are never navigable
    pub fn is_navigable(&self) -> bool {
        self.season_number > 0 && self.episode_count > 0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Season {} ({} episodes)",
            self.season_number, self.episode_count
        )
    }
}

/// Keep only navigable seasons, preserving order
pub fn navigable_seasons(seasons: Vec<Season>) -> Vec<Season> {
    seasons.into_iter().filter(Season::is_navigable).collect()
}

/// TV episode information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_number: u16,
    pub name: String,
    pub overview: Option<String>,
    pub still_path: Option<String>,
    pub air_date: Option<String>,
    pub vote_average: Option<f32>,
}

impl Episode {
    /// Episode name, or "Episode N" when the API left it blank
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Episode {}", self.episode_number)
        } else {
            self.name.clone()
        }
    }

    /// Rating text with one decimal, `None` when unrated
    pub fn rating_text(&self) -> Option<String> {
        self.vote_average
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| format!("{:.1}", v))
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:02} - {}", self.episode_number, self.display_name())
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Persisted colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Dark => write!(f, "dark"),
            ThemePreference::Light => write!(f, "light"),
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            other => Err(format!("unknown theme '{}' (expected dark or light)", other)),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Five-star rating from a 0–10 vote average, rounded to the nearest star
pub fn star_rating(vote_average: f32) -> u8 {
    if !vote_average.is_finite() || vote_average <= 0.0 {
        return 0;
    }
    ((vote_average / 2.0).round() as u8).min(5)
}
