//! Video-embed providers
//!
//! Each provider serves a playable page for a title at a predictable URL.
//! Building the URL is pure: no network call is made here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MediaKind;

/// Third-party embed provider selectable in the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmbedProvider {
    /// vidsrc.cc (`/v2/embed/...` paths)
    #[default]
    #[serde(rename = "vidsrc.cc")]
    VidsrcCc,
    /// vidsrc.net (`?tmdb=` query style)
    #[serde(rename = "vidsrc.net")]
    VidsrcNet,
    /// player.videasy.net (bare paths)
    #[serde(rename = "player.videasy.net")]
    Videasy,
}

impl EmbedProvider {
    /// All providers in selector order
    pub const ALL: [EmbedProvider; 3] = [
        EmbedProvider::VidsrcCc,
        EmbedProvider::VidsrcNet,
        EmbedProvider::Videasy,
    ];

    /// Host name, also used as the display label
    pub fn host(&self) -> &'static str {
        match self {
            EmbedProvider::VidsrcCc => "vidsrc.cc",
            EmbedProvider::VidsrcNet => "vidsrc.net",
            EmbedProvider::Videasy => "player.videasy.net",
        }
    }

    /// Next provider in selector order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Build the embed URL for a title.
    ///
    /// `season` and `episode` are ignored for movies.
    pub fn embed_url(&self, kind: MediaKind, id: u64, season: u16, episode: u16) -> String {
        let host = self.host();
        match (self, kind) {
            (EmbedProvider::VidsrcCc, MediaKind::Movie) => {
                format!("https://{}/v2/embed/movie/{}", host, id)
            }
            (EmbedProvider::VidsrcCc, MediaKind::Tv) => {
                format!("https://{}/v2/embed/tv/{}/{}/{}", host, id, season, episode)
            }
            (EmbedProvider::VidsrcNet, MediaKind::Movie) => {
                format!("https://{}/embed/movie/?tmdb={}", host, id)
            }
            (EmbedProvider::VidsrcNet, MediaKind::Tv) => format!(
                "https://{}/embed/tv/?tmdb={}&season={}&episode={}",
                host, id, season, episode
            ),
            (EmbedProvider::Videasy, MediaKind::Movie) => format!("https://{}/movie/{}", host, id),
            (EmbedProvider::Videasy, MediaKind::Tv) => {
                format!("https://{}/tv/{}/{}/{}", host, id, season, episode)
            }
        }
    }
}

impl fmt::Display for EmbedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}
