//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the TMDB client and the embed
//! builder. Each handler takes CLI args and Output, returns ExitCode.

use crate::api::tmdb::TmdbError;
use crate::api::{EmbedProvider, TmdbClient};
use crate::cli::{
    EmbedCmd, EmbedResponse, EpisodesCmd, ExitCode, Output, SearchCmd, SeasonsCmd, ThemeCmd,
    ThemeResponse, TrendingCmd, TrendingKind,
};
use crate::config::{Config, ConfigStore};
use crate::models::{navigable_seasons, MediaKind, MediaSummary, ThemePreference};

/// Map a client error to the exit code scripts see
fn api_error(output: &Output, context: &str, err: TmdbError) -> ExitCode {
    let code = match err {
        TmdbError::NotFound => ExitCode::NoResults,
        _ => ExitCode::NetworkError,
    };
    output.error(format!("{}: {}", context, err), code)
}

/// Print a non-empty list, or report that nothing matched
fn print_results<T>(output: &Output, items: &[T], empty: &str) -> ExitCode
where
    T: serde::Serialize + std::fmt::Display,
{
    if items.is_empty() {
        return output.error(empty, ExitCode::NoResults);
    }
    match output.print_list(items) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Trending Command
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching trending {:?}...", cmd.kind).to_lowercase());

    let fetched: Result<Vec<MediaSummary>, TmdbError> = match cmd.kind {
        TrendingKind::Movie => client.try_trending(MediaKind::Movie, None).await,
        TrendingKind::Tv => client.try_trending(MediaKind::Tv, None).await,
        // Per-page failures are skipped inside the anime scan
        TrendingKind::Anime => Ok(client.fetch_trending_anime().await),
    };

    match fetched {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            print_results(output, &items, "No trending titles right now")
        }
        Err(e) => api_error(output, "Trending fetch failed", e),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.is_empty() {
        return output.error("Search query must not be blank", ExitCode::InvalidArgs);
    }

    output.info(format!("Searching for: {}", query));

    match client.try_search(query).await {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            print_results(output, &items, &format!("No results found for \"{}\"", query))
        }
        Err(e) => api_error(output, "Search failed", e),
    }
}

// =============================================================================
// Seasons / Episodes Commands
// =============================================================================

pub async fn seasons_cmd(cmd: SeasonsCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    match client.try_seasons(cmd.id).await {
        Ok(seasons) => {
            let seasons = navigable_seasons(seasons);
            print_results(output, &seasons, "No seasons available for this series")
        }
        Err(e) => api_error(output, "Season fetch failed", e),
    }
}

pub async fn episodes_cmd(cmd: EpisodesCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    if cmd.season == 0 {
        return output.error("Season numbers start at 1", ExitCode::InvalidArgs);
    }

    match client.try_episodes(cmd.id, cmd.season).await {
        Ok(episodes) => print_results(output, &episodes, "No episodes available for this season"),
        Err(e) => api_error(output, "Episode fetch failed", e),
    }
}

// =============================================================================
// Embed Command
// =============================================================================

pub fn embed_cmd(cmd: EmbedCmd, default_provider: EmbedProvider, output: &Output) -> ExitCode {
    let kind = MediaKind::from(cmd.kind);
    if kind == MediaKind::Tv && (cmd.season == 0 || cmd.episode == 0) {
        return output.error(
            "Season and episode numbers start at 1",
            ExitCode::InvalidArgs,
        );
    }

    let provider = cmd.provider.map(EmbedProvider::from).unwrap_or(default_provider);
    let is_tv = kind == MediaKind::Tv;
    let response = EmbedResponse {
        id: cmd.id,
        kind,
        provider,
        season: is_tv.then_some(cmd.season),
        episode: is_tv.then_some(cmd.episode),
        url: provider.embed_url(kind, cmd.id, cmd.season, cmd.episode),
    };

    match output.print(&response) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Theme Command
// =============================================================================

pub fn theme_cmd(cmd: ThemeCmd, store: &ConfigStore, config: &Config, output: &Output) -> ExitCode {
    let theme = match cmd.theme {
        Some(arg) => {
            let theme = ThemePreference::from(arg);
            if let Err(e) = store.save_theme(theme) {
                return output.error(format!("Could not save config: {}", e), ExitCode::Error);
            }
            output.info(format!("Theme set to {}", theme));
            theme
        }
        None => config.theme,
    };

    let response = ThemeResponse {
        theme,
        config: store.path().map(|p| p.to_path_buf()),
    };
    match output.print(&response) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}
