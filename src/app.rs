//! App state and core application logic
//!
//! Owns the home screen models, the detail controller and the search
//! overlay, and routes keyboard input between them. Key handling is
//! synchronous; anything that needs the network comes back as an
//! [`Action`] for the event loop to [`App::perform`].

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{EmbedProvider, TmdbClient};
use crate::catalog::{
    pick_banner, render_trending_grid, Banner, CardRow, TrendingGrid, GRID_COLUMNS,
};
use crate::config::ConfigStore;
use crate::detail::DetailController;
use crate::models::{MediaKind, MediaSummary, ThemePreference};
use crate::search::SearchOverlay;
use crate::ui::Theme;

/// Row indices on the home screen
pub const MOVIES_ROW: usize = 0;
pub const TV_ROW: usize = 1;
pub const ANIME_ROW: usize = 2;

/// Focusable home sections: the three rows, then the grid
pub const GRID_SECTION: usize = 3;

// =============================================================================
// Startup loading
// =============================================================================

/// One startup feed landing
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogUpdate {
    Movies(Vec<MediaSummary>),
    Tv(Vec<MediaSummary>),
    Anime(Vec<MediaSummary>),
}

/// Fetch the three home feeds in independent tasks.
///
/// Each task reports on `tx` as soon as its own feed is in, so a slow or
/// failing source never holds back the others.
pub fn spawn_catalog_loaders(client: Arc<TmdbClient>, tx: mpsc::Sender<CatalogUpdate>) {
    {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let items = client.fetch_trending(MediaKind::Movie).await;
            info!(count = items.len(), "movie trending loaded");
            let _ = tx.send(CatalogUpdate::Movies(items)).await;
        });
    }
    {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let items = client.fetch_trending(MediaKind::Tv).await;
            info!(count = items.len(), "tv trending loaded");
            let _ = tx.send(CatalogUpdate::Tv(items)).await;
        });
    }
    tokio::spawn(async move {
        let items = client.fetch_trending_anime().await;
        info!(count = items.len(), "anime trending loaded");
        let _ = tx.send(CatalogUpdate::Anime(items)).await;
    });
}

// =============================================================================
// Actions
// =============================================================================

/// Async work requested by a key press
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Action {
    #[default]
    None,
    /// Open the detail view for an item (fetches seasons for TV)
    OpenDetail(MediaSummary),
    /// Move one season back or forward in the open detail view
    ChangeSeason(i32),
    /// Run the search overlay's current query
    SubmitSearch,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Waiting for the first startup feed
    pub loading: bool,
    pub theme: Theme,
    store: ConfigStore,

    // Home screen
    pub banner: Banner,
    pub rows: [CardRow; 3],
    pub grid: TrendingGrid,
    pub grid_cursor: usize,
    /// Focused section (`MOVIES_ROW`..=`GRID_SECTION`)
    pub focus: usize,
    trending_movies: Vec<MediaSummary>,
    trending_tv: Vec<MediaSummary>,

    // Modals
    pub detail: DetailController,
    pub search: SearchOverlay,
    pub disclaimer: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(
            ThemePreference::default(),
            EmbedProvider::default(),
            ConfigStore::ephemeral(),
        )
    }
}

impl App {
    /// Create a new App with the persisted theme applied
    pub fn new(theme: ThemePreference, provider: EmbedProvider, store: ConfigStore) -> Self {
        Self {
            running: true,
            loading: true,
            theme: Theme::for_preference(theme),
            store,
            banner: Banner::default(),
            rows: [
                CardRow::new("Trending Movies"),
                CardRow::new("Trending TV Shows"),
                CardRow::new("Trending Anime"),
            ],
            grid: TrendingGrid::Empty,
            grid_cursor: 0,
            focus: MOVIES_ROW,
            trending_movies: Vec::new(),
            trending_tv: Vec::new(),
            detail: DetailController::new(provider),
            search: SearchOverlay::new(),
            disclaimer: false,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Fold a startup feed into the home screen
    pub fn apply_catalog(&mut self, update: CatalogUpdate) {
        self.loading = false;
        match update {
            CatalogUpdate::Movies(items) => {
                self.banner = Banner::from_item(pick_banner(&items, &mut rand::thread_rng()));
                self.rows[MOVIES_ROW].set_items(&items);
                self.trending_movies = items;
                self.rebuild_grid();
            }
            CatalogUpdate::Tv(items) => {
                self.rows[TV_ROW].set_items(&items);
                self.trending_tv = items;
                self.rebuild_grid();
            }
            CatalogUpdate::Anime(items) => {
                self.rows[ANIME_ROW].set_items(&items);
            }
        }
    }

    fn rebuild_grid(&mut self) {
        let combined: Vec<MediaSummary> = self
            .trending_movies
            .iter()
            .chain(self.trending_tv.iter())
            .cloned()
            .collect();
        self.grid = render_trending_grid(&combined);
        self.grid_cursor = self.grid_cursor.min(self.grid.len().saturating_sub(1));
    }

    /// Keep every row's focused card inside a viewport `visible` cards wide
    pub fn fit_rows(&mut self, visible: usize) {
        for row in &mut self.rows {
            row.scroll_into_view(visible);
        }
    }

    /// Item under the home focus
    pub fn focused_item(&self) -> Option<&MediaSummary> {
        if self.focus == GRID_SECTION {
            self.grid.cards().get(self.grid_cursor).map(|c| &c.item)
        } else {
            self.rows[self.focus].current().map(|c| &c.item)
        }
    }

    /// Focus the first row and rewind its scroll
    pub fn back_to_top(&mut self) {
        self.focus = MOVIES_ROW;
        self.rows[MOVIES_ROW].rewind();
    }

    // -------------------------------------------------------------------------
    // Shell
    // -------------------------------------------------------------------------

    /// Flip dark/light and persist the choice
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = %self.theme.preference, "theme changed");
        if let Err(e) = self.store.save_theme(self.theme.preference) {
            warn!(error = %e, "could not persist theme");
        }
    }

    /// Close the detail view, the search overlay and the disclaimer
    pub fn close_all(&mut self) {
        self.detail.close();
        self.search.close();
        self.disclaimer = false;
    }

    /// Something is drawn over the home screen
    pub fn modal_open(&self) -> bool {
        self.detail.is_open() || self.search.visible || self.disclaimer
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returning any async work it asks for
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Action::None;
        }

        if key.code == KeyCode::Esc {
            self.close_all();
            return Action::None;
        }

        // The query field swallows every printable key
        if self.search.visible && self.search.editing {
            return self.handle_editing_key(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return Action::None;
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                return Action::None;
            }
            KeyCode::Char('?') => {
                self.disclaimer = !self.disclaimer;
                return Action::None;
            }
            _ => {}
        }

        if self.disclaimer {
            if key.code == KeyCode::Enter {
                self.disclaimer = false;
            }
            Action::None
        } else if self.detail.is_open() {
            self.handle_detail_key(key)
        } else if self.search.visible {
            self.handle_results_key(key)
        } else {
            self.handle_home_key(key)
        }
    }

    /// Keys while the search query has focus
    fn handle_editing_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => return Action::SubmitSearch,
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Down | KeyCode::Tab if !self.search.results.cards().is_empty() => {
                self.search.editing = false;
            }
            _ => {}
        }
        Action::None
    }

    /// Keys while browsing search results
    fn handle_results_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.search.selected == 0 {
                    self.search.editing = true;
                } else {
                    self.search.up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.search.down(),
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => self.search.editing = true,
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Overlay is already closed when the detail opens
                if let Some(item) = self.search.activate_selected() {
                    return Action::OpenDetail(item);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                return Action::ChangeSeason(-1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                return Action::ChangeSeason(1);
            }
            KeyCode::Up | KeyCode::Char('k') => self.detail.step_episode(-1),
            KeyCode::Down | KeyCode::Char('j') => self.detail.step_episode(1),
            KeyCode::Char('p') | KeyCode::Tab => self.detail.cycle_provider(),
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as usize) - ('1' as usize);
                self.detail.change_provider(EmbedProvider::ALL[idx]);
            }
            _ => {}
        }
        Action::None
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('s') => self.search.open(),
            KeyCode::Char('g') | KeyCode::Home => self.back_to_top(),
            KeyCode::Left | KeyCode::Char('h') => self.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.move_right(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(item) = self.focused_item() {
                    return Action::OpenDetail(item.clone());
                }
            }
            _ => {}
        }
        Action::None
    }

    fn move_left(&mut self) {
        if self.focus == GRID_SECTION {
            if self.grid_cursor % GRID_COLUMNS > 0 {
                self.grid_cursor -= 1;
            }
        } else {
            self.rows[self.focus].left();
        }
    }

    fn move_right(&mut self) {
        if self.focus == GRID_SECTION {
            let at_row_end = self.grid_cursor % GRID_COLUMNS == GRID_COLUMNS - 1;
            if !at_row_end && self.grid_cursor + 1 < self.grid.len() {
                self.grid_cursor += 1;
            }
        } else {
            self.rows[self.focus].right();
        }
    }

    fn move_up(&mut self) {
        if self.focus == GRID_SECTION && self.grid_cursor >= GRID_COLUMNS {
            self.grid_cursor -= GRID_COLUMNS;
        } else {
            self.focus = self.focus.saturating_sub(1);
        }
    }

    fn move_down(&mut self) {
        if self.focus == GRID_SECTION {
            if self.grid_cursor + GRID_COLUMNS < self.grid.len() {
                self.grid_cursor += GRID_COLUMNS;
            }
        } else {
            self.focus += 1;
        }
    }

    // -------------------------------------------------------------------------
    // Async actions
    // -------------------------------------------------------------------------

    /// Carry out an [`Action`] against the API
    pub async fn perform(&mut self, action: Action, client: &TmdbClient) {
        match action {
            Action::None => {}
            Action::OpenDetail(item) => self.detail.open(item, client).await,
            Action::ChangeSeason(direction) => {
                self.detail.change_season(direction, client).await;
            }
            Action::SubmitSearch => self.search.submit(client).await,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
