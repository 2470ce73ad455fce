//! FlixTUI - terminal catalog browser for movies, TV shows and anime
//!
//! Trending rows, a trending grid, search, and a detail view with a
//! season/episode picker that produces embed-player links.
//!
//! # Modules
//!
//! - `models` - Media summaries, seasons, episodes, preferences
//! - `api` - TMDB client and embed providers
//! - `catalog` - Banner, cards, rows and the trending grid
//! - `detail` - Detail view controller and selection state
//! - `search` - Search overlay state
//! - `config` - Config file and theme persistence
//! - `app` - Application state and key routing
//! - `ui` - ratatui renderers and themes
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod models;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use models::{Episode, MediaKind, MediaSummary, Season, ThemePreference};

pub use api::{EmbedProvider, TmdbClient};
pub use app::{Action, App, CatalogUpdate};
pub use detail::{DetailController, DetailPhase, SelectionState};
pub use search::{SearchOverlay, SearchResults};
