//! Detail controller tests
//!
//! Opening movies and TV shows, season navigation at the edges, episode
//! selection and closing, against a mocked API.

use mockito::{Matcher, Mock, Server, ServerGuard};
use flixtui::api::{EmbedProvider, TmdbClient};
use flixtui::detail::{DetailController, DetailPhase};
use flixtui::models::{MediaKind, MediaSummary};

const SEASONS: &str = r#"{
    "id": 42,
    "seasons": [
        {"season_number": 0, "episode_count": 4, "name": "Specials"},
        {"season_number": 1, "episode_count": 3, "name": "Season 1"},
        {"season_number": 2, "episode_count": 0, "name": "Season 2"},
        {"season_number": 3, "episode_count": 2, "name": "Season 3"}
    ]
}"#;

fn episodes_body(count: u16) -> String {
    let episodes: Vec<String> = (1..=count)
        .map(|n| format!(r#"{{"episode_number": {n}, "name": "Episode name {n}"}}"#))
        .collect();
    format!(r#"{{"episodes": [{}]}}"#, episodes.join(","))
}

async fn mock_episodes(server: &mut ServerGuard, season: u16, count: u16, hits: usize) -> Mock {
    server
        .mock("GET", format!("/tv/42/season/{}", season).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(episodes_body(count))
        .expect(hits)
        .create_async()
        .await
}

fn show(id: u64) -> MediaSummary {
    MediaSummary::new(id, MediaKind::Tv, "Show")
}

// =============================================================================
// Opening
// =============================================================================

#[tokio::test]
async fn test_open_tv_selects_first_navigable_season() {
    let mut server = Server::new_async().await;
    let seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEASONS)
        .create_async()
        .await;
    let season_one = mock_episodes(&mut server, 1, 3, 1).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    seasons.assert_async().await;
    season_one.assert_async().await;

    assert_eq!(detail.phase(), DetailPhase::TvSeason);
    let sel = detail.selection();
    // Specials and the empty season are dropped
    let numbers: Vec<u16> = sel.seasons.iter().map(|s| s.season_number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(sel.selected_season_number, 1);
    assert_eq!(sel.episodes.len(), 3);
    assert_eq!(sel.selected_episode_number, 1);
    assert!(!detail.prev_enabled());
    assert!(detail.next_enabled());
    assert_eq!(detail.embed_url(), "https://vidsrc.cc/v2/embed/tv/42/1/1");
}

#[tokio::test]
async fn test_open_tv_without_seasons() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"seasons": [{"season_number": 0, "episode_count": 6}]}"#)
        .create_async()
        .await;
    let episodes = server
        .mock("GET", Matcher::Regex(r"^/tv/42/season/".into()))
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    episodes.assert_async().await;
    assert_eq!(detail.phase(), DetailPhase::TvNoSeasons);
    assert!(detail.selection().seasons.is_empty());
    assert!(!detail.change_season(1, &client).await);
}

#[tokio::test]
async fn test_open_tv_when_season_fetch_fails() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    assert_eq!(detail.phase(), DetailPhase::TvNoSeasons);
    assert!(detail.is_open());
}

#[tokio::test]
async fn test_open_movie_makes_no_requests() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::new(EmbedProvider::Videasy);
    detail.open(MediaSummary::new(7, MediaKind::Movie, "Film"), &client).await;

    any.assert_async().await;
    assert_eq!(detail.phase(), DetailPhase::Movie);
    assert_eq!(detail.embed_url(), "https://player.videasy.net/movie/7");
}

#[tokio::test]
async fn test_reopen_resets_selection() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEASONS)
        .expect(2)
        .create_async()
        .await;
    let _s1 = mock_episodes(&mut server, 1, 3, 2).await;
    let _s3 = mock_episodes(&mut server, 3, 2, 1).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;
    assert!(detail.change_season(1, &client).await);
    detail.select_episode(2);
    detail.change_provider(EmbedProvider::VidsrcNet);
    detail.close();

    detail.open(show(42), &client).await;
    let sel = detail.selection();
    assert_eq!(sel.selected_season_number, 1);
    assert_eq!(sel.selected_episode_number, 1);
    assert_eq!(sel.selected_provider, EmbedProvider::VidsrcCc);
}

// =============================================================================
// Season navigation
// =============================================================================

#[tokio::test]
async fn test_change_season_bounds_do_not_refetch() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEASONS)
        .create_async()
        .await;
    // Each season's episodes are fetched exactly once
    let season_one = mock_episodes(&mut server, 1, 3, 1).await;
    let season_three = mock_episodes(&mut server, 3, 2, 1).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    // Already on the first season
    assert!(!detail.change_season(-1, &client).await);
    assert_eq!(detail.selection().selected_season_number, 1);

    detail.select_episode(3);
    assert!(detail.change_season(1, &client).await);
    let sel = detail.selection();
    assert_eq!(sel.selected_season_number, 3);
    assert_eq!(sel.selected_episode_number, 1);
    assert_eq!(sel.episodes.len(), 2);
    assert!(detail.prev_enabled());
    assert!(!detail.next_enabled());
    assert_eq!(detail.embed_url(), "https://vidsrc.cc/v2/embed/tv/42/3/1");

    // Already on the last season
    assert!(!detail.change_season(1, &client).await);
    assert_eq!(detail.selection().selected_season_number, 3);

    season_one.assert_async().await;
    season_three.assert_async().await;
}

#[tokio::test]
async fn test_season_with_no_episodes() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEASONS)
        .create_async()
        .await;
    let _s1 = server
        .mock("GET", "/tv/42/season/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"episodes": []}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    assert_eq!(detail.phase(), DetailPhase::TvSeason);
    assert!(detail.selection().episodes.is_empty());
    // Stepping through an empty list changes nothing
    detail.step_episode(1);
    assert_eq!(detail.selection().selected_episode_number, 1);
}

// =============================================================================
// Episodes, providers, close
// =============================================================================

#[tokio::test]
async fn test_episode_and_provider_drive_embed_url() {
    let mut server = Server::new_async().await;
    let _seasons = server
        .mock("GET", "/tv/42")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEASONS)
        .create_async()
        .await;
    let _s1 = mock_episodes(&mut server, 1, 3, 1).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut detail = DetailController::default();
    detail.open(show(42), &client).await;

    detail.step_episode(1);
    assert_eq!(detail.embed_url(), "https://vidsrc.cc/v2/embed/tv/42/1/2");

    detail.change_provider(EmbedProvider::VidsrcNet);
    assert_eq!(
        detail.embed_url(),
        "https://vidsrc.net/embed/tv/?tmdb=42&season=1&episode=2"
    );

    detail.close();
    assert_eq!(detail.embed_url(), "");
    assert_eq!(detail.phase(), DetailPhase::Closed);
}
