//! API clients and URL builders for external services
//!
//! - TMDB: trending feeds, search, seasons and episodes
//! - Embed: video-embed provider URL templates

pub mod embed;
pub mod tmdb;

pub use embed::EmbedProvider;
pub use tmdb::TmdbClient;
