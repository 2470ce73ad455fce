//! Search overlay tests
//!
//! Query shaping, empty and failure states, and result activation.

use mockito::{Matcher, Server};
use flixtui::api::TmdbClient;
use flixtui::search::{SearchOverlay, SearchResults, SEARCH_FAILED_MESSAGE, SEARCH_PLACEHOLDER};

const RESULTS: &str = r#"{
    "results": [
        {"id": 603, "media_type": "movie", "title": "The Matrix", "release_date": "1999-03-31", "poster_path": "/m.jpg", "vote_average": 8.2},
        {"id": 6384, "media_type": "person", "name": "Keanu Reeves", "profile_path": "/k.jpg"},
        {"id": 604, "media_type": "movie", "title": "The Matrix Reloaded", "poster_path": "/r.jpg"}
    ]
}"#;

fn typed(query: &str) -> SearchOverlay {
    let mut overlay = SearchOverlay::new();
    overlay.open();
    for c in query.chars() {
        overlay.insert(c);
    }
    overlay
}

#[tokio::test]
async fn test_submit_shows_displayable_results() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/multi")
        .match_query(Matcher::UrlEncoded("query".into(), "matrix".into()))
        .with_status(200)
        .with_body(RESULTS)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut overlay = typed("matrix");
    overlay.submit(&client).await;

    mock.assert_async().await;

    let titles: Vec<&str> = overlay.results.cards().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["The Matrix", "The Matrix Reloaded"]);
    assert!(overlay.results.message().is_none());
    // Focus moves from the query field to the results
    assert!(!overlay.editing);
    assert_eq!(overlay.selected, 0);
}

#[tokio::test]
async fn test_no_displayable_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/multi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results": [{"id": 1, "media_type": "person", "name": "Somebody"}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut overlay = typed("zzzz");
    overlay.submit(&client).await;

    assert_eq!(overlay.results, SearchResults::NoResults("zzzz".into()));
    assert_eq!(
        overlay.results.message().as_deref(),
        Some("No results found for \"zzzz\"")
    );
    // Nothing to browse, so the query field keeps focus
    assert!(overlay.editing);
}

#[tokio::test]
async fn test_failed_search_is_distinct_from_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/multi")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut overlay = typed("dune");
    overlay.submit(&client).await;

    assert_eq!(overlay.results, SearchResults::Failed);
    assert_eq!(
        overlay.results.message().as_deref(),
        Some(SEARCH_FAILED_MESSAGE)
    );
    assert!(overlay.visible);
    assert!(overlay.editing);
}

#[tokio::test]
async fn test_blank_query_restores_placeholder_without_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut overlay = typed("   ");
    overlay.results = SearchResults::Failed;
    overlay.submit(&client).await;

    mock.assert_async().await;
    assert_eq!(overlay.results, SearchResults::Placeholder);
    assert_eq!(overlay.results.message().as_deref(), Some(SEARCH_PLACEHOLDER));
    assert!(overlay.editing);
}

#[tokio::test]
async fn test_activate_closes_overlay_first() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/multi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(RESULTS)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut overlay = typed("matrix");
    overlay.submit(&client).await;
    overlay.down();

    let item = overlay.activate_selected().expect("a result is highlighted");
    assert_eq!(item.id, 604);
    assert!(!overlay.visible);
    assert!(overlay.query.is_empty());
    assert_eq!(overlay.results, SearchResults::Placeholder);

    // Nothing left to activate
    assert!(overlay.activate(0).is_none());
}
