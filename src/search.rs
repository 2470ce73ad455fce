//! Search overlay state
//!
//! Free-text query box over the catalog. Results are cards; activating one
//! closes the overlay first and hands the item to the detail controller.

use tracing::warn;

use crate::api::tmdb::is_displayable;
use crate::api::TmdbClient;
use crate::catalog::Card;
use crate::models::MediaSummary;

pub const SEARCH_PLACEHOLDER: &str = "Search for movies and TV shows...";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// What the results area currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchResults {
    /// Blank query
    #[default]
    Placeholder,
    Results(Vec<Card>),
    /// The query returned nothing usable
    NoResults(String),
    Failed,
}

impl SearchResults {
    pub fn cards(&self) -> &[Card] {
        match self {
            SearchResults::Results(cards) => cards,
            _ => &[],
        }
    }

    /// Empty-state text, when not showing results
    pub fn message(&self) -> Option<String> {
        match self {
            SearchResults::Placeholder => Some(SEARCH_PLACEHOLDER.to_string()),
            SearchResults::Results(_) => None,
            SearchResults::NoResults(q) => Some(format!("No results found for \"{}\"", q)),
            SearchResults::Failed => Some(SEARCH_FAILED_MESSAGE.to_string()),
        }
    }
}

/// Search overlay
#[derive(Debug, Clone, Default)]
pub struct SearchOverlay {
    pub visible: bool,
    /// Query field has keyboard focus
    pub editing: bool,
    pub query: String,
    /// Cursor position in query (chars)
    pub cursor: usize,
    pub results: SearchResults,
    /// Highlighted result
    pub selected: usize,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay with the query field focused
    pub fn open(&mut self) {
        self.visible = true;
        self.editing = true;
    }

    /// Hide the overlay, clearing results and the query field
    pub fn close(&mut self) {
        self.visible = false;
        self.editing = false;
        self.query.clear();
        self.cursor = 0;
        self.results = SearchResults::Placeholder;
        self.selected = 0;
    }

    // -------------------------------------------------------------------------
    // Query editing
    // -------------------------------------------------------------------------

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    // -------------------------------------------------------------------------
    // Querying
    // -------------------------------------------------------------------------

    /// Run the current query field against the API
    pub async fn submit(&mut self, client: &TmdbClient) {
        let text = self.query.clone();
        self.query(&text, client).await;
    }

    /// Run `text`; a blank query restores the placeholder without a request
    pub async fn query(&mut self, text: &str, client: &TmdbClient) {
        let text = text.trim();
        self.selected = 0;
        if text.is_empty() {
            self.results = SearchResults::Placeholder;
            return;
        }

        self.results = match client.try_search(text).await {
            Ok(items) => Self::shape_results(text, items),
            Err(e) => {
                warn!(query = text, error = %e, "search failed");
                SearchResults::Failed
            }
        };
        // Only hand focus to the results when there is something to browse
        self.editing = self.results.cards().is_empty();
    }

    /// Filter to displayable titles and build their cards
    pub fn shape_results(query: &str, items: Vec<MediaSummary>) -> SearchResults {
        let cards: Vec<Card> = items
            .iter()
            .filter(|i| is_displayable(i))
            .filter_map(Card::from_item)
            .collect();

        if cards.is_empty() {
            SearchResults::NoResults(query.to_string())
        } else {
            SearchResults::Results(cards)
        }
    }

    // -------------------------------------------------------------------------
    // Result navigation
    // -------------------------------------------------------------------------

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.results.cards().len() {
            self.selected += 1;
        }
    }

    /// Close the overlay, then return the activated item
    pub fn activate(&mut self, index: usize) -> Option<MediaSummary> {
        let item = self.results.cards().get(index).map(|c| c.item.clone())?;
        self.close();
        Some(item)
    }

    /// Activate the highlighted result
    pub fn activate_selected(&mut self) -> Option<MediaSummary> {
        self.activate(self.selected)
    }
}
