//! TMDB (The Movie Database) API client
//!
//! Trending feeds, multi-search and season/episode listings.
//! API docs: https://developer.themoviedb.org/docs
//!
//! Every public fetch is fail-soft: a transport error, a non-success status
//! or an unparseable body is logged and turned into an empty result, so one
//! broken request empties a single list instead of taking the view down.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Episode, MediaKind, MediaSummary, Season};

/// Public v3 API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Image CDN root
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Pages of the weekly TV feed scanned for anime
pub const ANIME_PAGES: u32 = 3;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    /// Replace the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated GET; the key travels as the `api_key` query parameter
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "tmdb request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            status => Err(TmdbError::ServerError(status.as_u16())),
        }
    }

    // -------------------------------------------------------------------------
    // Trending
    // -------------------------------------------------------------------------

    /// Weekly trending titles of one kind
    pub async fn fetch_trending(&self, kind: MediaKind) -> Vec<MediaSummary> {
        match self.try_trending(kind, None).await {
            Ok(items) => items,
            Err(e) => {
                warn!(kind = kind.as_path(), error = %e, "trending fetch failed");
                Vec::new()
            }
        }
    }

    /// Fallible weekly trending feed, optionally paged
    pub async fn try_trending(
        &self,
        kind: MediaKind,
        page: Option<u32>,
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        let endpoint = format!("/trending/{}/week", kind.as_path());
        let params: Vec<(&str, String)> = page.map(|p| ("page", p.to_string())).into_iter().collect();
        let response: ResultsResponse = self.get(&endpoint, &params).await?;
        Ok(response.into_summaries(Some(kind)))
    }

    /// Japanese animation from the first pages of the weekly TV feed.
    ///
    /// Pages are fetched one after another; a failing page is logged and
    /// skipped while the others still contribute.
    pub async fn fetch_trending_anime(&self) -> Vec<MediaSummary> {
        let mut anime = Vec::new();
        for page in 1..=ANIME_PAGES {
            match self.try_trending(MediaKind::Tv, Some(page)).await {
                Ok(items) => anime.extend(items.into_iter().filter(MediaSummary::is_anime)),
                Err(e) => warn!(page, error = %e, "anime page fetch failed"),
            }
        }
        anime
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Multi-search, fail-soft
    pub async fn search(&self, query: &str) -> Vec<MediaSummary> {
        match self.try_search(query).await {
            Ok(items) => items,
            Err(e) => {
                warn!(query, error = %e, "search failed");
                Vec::new()
            }
        }
    }

    /// Multi-search without person results, artless or untitled entries
    pub async fn try_search(&self, query: &str) -> Result<Vec<MediaSummary>, TmdbError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let params = [("query", query.to_string()), ("page", "1".to_string())];
        let response: ResultsResponse = self.get("/search/multi", &params).await?;
        Ok(response
            .into_summaries(None)
            .into_iter()
            .filter(is_displayable)
            .collect())
    }

    // -------------------------------------------------------------------------
    // Seasons / Episodes
    // -------------------------------------------------------------------------

    /// All seasons of a TV title, unfiltered
    pub async fn fetch_seasons(&self, tv_id: u64) -> Vec<Season> {
        match self.try_seasons(tv_id).await {
            Ok(seasons) => seasons,
            Err(e) => {
                warn!(tv_id, error = %e, "season fetch failed");
                Vec::new()
            }
        }
    }

    pub async fn try_seasons(&self, tv_id: u64) -> Result<Vec<Season>, TmdbError> {
        let endpoint = format!("/tv/{}", tv_id);
        let response: TvResponse = self.get(&endpoint, &[]).await?;
        Ok(response.seasons.into_iter().map(SeasonRaw::into_season).collect())
    }

    /// Episodes of one season
    pub async fn fetch_episodes(&self, tv_id: u64, season: u16) -> Vec<Episode> {
        match self.try_episodes(tv_id, season).await {
            Ok(episodes) => episodes,
            Err(e) => {
                warn!(tv_id, season, error = %e, "episode fetch failed");
                Vec::new()
            }
        }
    }

    pub async fn try_episodes(&self, tv_id: u64, season: u16) -> Result<Vec<Episode>, TmdbError> {
        let endpoint = format!("/tv/{}/season/{}", tv_id, season);
        let response: SeasonResponse = self.get(&endpoint, &[]).await?;
        Ok(response
            .episodes
            .into_iter()
            .map(EpisodeRaw::into_episode)
            .collect())
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Search results must be a titled movie/TV entry with some artwork
pub fn is_displayable(item: &MediaSummary) -> bool {
    item.has_artwork() && item.has_title()
}

/// Poster image URL (w500)
pub fn poster_url(path: &str) -> String {
    format!("{}/w500{}", IMAGE_BASE_URL, path)
}

/// Backdrop image URL (original size)
pub fn backdrop_url(path: &str) -> String {
    format!("{}/original{}", IMAGE_BASE_URL, path)
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Vec<MediaRaw>,
}

impl ResultsResponse {
    fn into_summaries(self, feed_kind: Option<MediaKind>) -> Vec<MediaSummary> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_summary(feed_kind))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MediaRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f32>,
    original_language: Option<String>,
    genre_ids: Option<Vec<u32>>,
}

impl MediaRaw {
    /// Resolve the kind: explicit `media_type`, then the feed the item came
    /// from, then title-vs-name. Anything that is not movie/tv is dropped.
    fn resolve_kind(&self, feed_kind: Option<MediaKind>) -> Option<MediaKind> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaKind::Movie),
            Some("tv") => Some(MediaKind::Tv),
            Some(_) => None,
            None => feed_kind.or_else(|| {
                if self.title.is_some() {
                    Some(MediaKind::Movie)
                } else if self.name.is_some() {
                    Some(MediaKind::Tv)
                } else {
                    None
                }
            }),
        }
    }

    fn into_summary(self, feed_kind: Option<MediaKind>) -> Option<MediaSummary> {
        let kind = self.resolve_kind(feed_kind)?;
        let title = match kind {
            MediaKind::Movie => self.title.or(self.name),
            MediaKind::Tv => self.name.or(self.title),
        }
        .unwrap_or_default();

        Some(MediaSummary {
            id: self.id,
            kind,
            title,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            release_date: self.release_date,
            first_air_date: self.first_air_date,
            vote_average: self.vote_average.unwrap_or(0.0),
            original_language: self.original_language.unwrap_or_default(),
            genre_ids: self.genre_ids.unwrap_or_default().into_iter().collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TvResponse {
    #[serde(default)]
    seasons: Vec<SeasonRaw>,
}

#[derive(Debug, Deserialize)]
struct SeasonRaw {
    season_number: u16,
    episode_count: Option<u16>,
    name: Option<String>,
}

impl SeasonRaw {
    fn into_season(self) -> Season {
        Season {
            season_number: self.season_number,
            episode_count: self.episode_count.unwrap_or(0),
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    #[serde(default)]
    episodes: Vec<EpisodeRaw>,
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    episode_number: u16,
    name: Option<String>,
    overview: Option<String>,
    still_path: Option<String>,
    air_date: Option<String>,
    vote_average: Option<f32>,
}

impl EpisodeRaw {
    fn into_episode(self) -> Episode {
        Episode {
            episode_number: self.episode_number,
            name: self.name.unwrap_or_default(),
            overview: self.overview.filter(|o| !o.is_empty()),
            still_path: self.still_path,
            air_date: self.air_date,
            vote_average: self.vote_average,
        }
    }
}
