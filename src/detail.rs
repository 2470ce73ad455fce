//! Detail controller
//!
//! Owns the "currently inspected title" and its season/episode selection,
//! drives the API calls that fill the season/episode picker, and keeps the
//! embed URL for the chosen provider up to date.
//!
//! ```text
//! Closed ──open(movie)──▶ Movie
//!        ──open(tv)─────▶ TvLoading ──seasons──▶ TvSeason { S, E }
//!                                   ──none─────▶ TvNoSeasons
//! any ──close()──▶ Closed
//! ```

use tracing::{debug, info};

use crate::api::{EmbedProvider, TmdbClient};
use crate::models::{navigable_seasons, Episode, MediaSummary, Season};

pub const NO_SEASONS_MESSAGE: &str = "No seasons available for this series";
pub const NO_EPISODES_MESSAGE: &str = "No episodes available for this season";

/// Where the detail view is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailPhase {
    #[default]
    Closed,
    /// Movie open; the season/episode panel is hidden
    Movie,
    /// TV title open, season list not loaded yet
    TvLoading,
    /// TV title without any navigable season
    TvNoSeasons,
    /// TV title with a selected season and episode
    TvSeason,
}

/// Selection for one open detail view
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub selected_item: Option<MediaSummary>,
    /// Navigable seasons only
    pub seasons: Vec<Season>,
    pub selected_season_number: u16,
    pub episodes: Vec<Episode>,
    pub selected_episode_number: u16,
    pub selected_provider: EmbedProvider,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_item: None,
            seasons: Vec::new(),
            selected_season_number: 1,
            episodes: Vec::new(),
            selected_episode_number: 1,
            selected_provider: EmbedProvider::default(),
        }
    }
}

impl SelectionState {
    /// Index of the selected season in `seasons`
    pub fn current_season_index(&self) -> Option<usize> {
        self.seasons
            .iter()
            .position(|s| s.season_number == self.selected_season_number)
    }

    /// Index of the selected episode in `episodes`
    pub fn current_episode_index(&self) -> Option<usize> {
        self.episodes
            .iter()
            .position(|e| e.episode_number == self.selected_episode_number)
    }

    pub fn is_tv(&self) -> bool {
        self.selected_item.as_ref().is_some_and(MediaSummary::is_tv)
    }
}

/// Detail view controller
#[derive(Debug, Clone, Default)]
pub struct DetailController {
    selection: SelectionState,
    phase: DetailPhase,
    embed_url: String,
    default_provider: EmbedProvider,
}

impl DetailController {
    /// Controller whose `open` resets to `default_provider`
    pub fn new(default_provider: EmbedProvider) -> Self {
        Self {
            default_provider,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> DetailPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DetailPhase::Closed
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn item(&self) -> Option<&MediaSummary> {
        self.selection.selected_item.as_ref()
    }

    /// Embed URL for the current selection; empty once closed
    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    // -------------------------------------------------------------------------
    // Open / close
    // -------------------------------------------------------------------------

    /// Reset the selection for `item` and show it, before any fetch.
    pub fn begin_open(&mut self, item: MediaSummary) {
        let is_tv = item.is_tv();
        self.selection = SelectionState {
            selected_item: Some(item),
            selected_provider: self.default_provider,
            ..SelectionState::default()
        };
        self.phase = if is_tv {
            DetailPhase::TvLoading
        } else {
            DetailPhase::Movie
        };
        self.refresh_embed_url();
    }

    /// Open `item`, loading seasons and the first season's episodes for TV
    pub async fn open(&mut self, item: MediaSummary, client: &TmdbClient) {
        info!(id = item.id, kind = item.kind.as_path(), "opening detail");
        self.begin_open(item);

        if self.phase == DetailPhase::TvLoading {
            self.load_seasons(client).await;
        }

        self.selection.selected_provider = self.default_provider;
        self.refresh_embed_url();
    }

    async fn load_seasons(&mut self, client: &TmdbClient) {
        let Some(id) = self.item().map(|i| i.id) else {
            return;
        };

        let seasons = navigable_seasons(client.fetch_seasons(id).await);
        debug!(id, count = seasons.len(), "navigable seasons");

        match seasons.first().map(|s| s.season_number) {
            Some(first) => {
                self.selection.seasons = seasons;
                self.phase = DetailPhase::TvSeason;
                self.load_episodes(client, first).await;
            }
            None => {
                self.selection.seasons.clear();
                self.phase = DetailPhase::TvNoSeasons;
            }
        }
    }

    /// Select `season`, fetch its episodes and auto-select episode 1
    async fn load_episodes(&mut self, client: &TmdbClient, season: u16) {
        let Some(id) = self.item().map(|i| i.id) else {
            return;
        };

        self.selection.selected_season_number = season;
        self.selection.episodes = client.fetch_episodes(id, season).await;
        self.select_episode(1);
    }

    /// Stop playback and hide the view. The selection stays as it was
    /// until the next `open` resets it.
    pub fn close(&mut self) {
        self.embed_url.clear();
        self.phase = DetailPhase::Closed;
    }

    // -------------------------------------------------------------------------
    // Season / episode navigation
    // -------------------------------------------------------------------------

    /// Move one season back (`-1`) or forward (`+1`).
    ///
    /// Returns `false` without fetching when there are no seasons or the
    /// move would leave the season list.
    pub async fn change_season(&mut self, direction: i32, client: &TmdbClient) -> bool {
        let Some(target) = self.season_target(direction) else {
            return false;
        };
        self.load_episodes(client, target).await;
        true
    }

    /// Season number a move in `direction` would land on, if in bounds
    pub fn season_target(&self, direction: i32) -> Option<u16> {
        let seasons = &self.selection.seasons;
        if seasons.is_empty() {
            return None;
        }
        let current = self.selection.current_season_index()? as i64;
        let next = current + i64::from(direction);
        if next < 0 {
            return None;
        }
        seasons.get(next as usize).map(|s| s.season_number)
    }

    /// Previous-season control is enabled
    pub fn prev_enabled(&self) -> bool {
        self.selection
            .current_season_index()
            .is_some_and(|i| i > 0)
    }

    /// Next-season control is enabled
    pub fn next_enabled(&self) -> bool {
        self.selection
            .current_season_index()
            .is_some_and(|i| i + 1 < self.selection.seasons.len())
    }

    /// Mark episode `n` active and retarget the player for TV titles
    pub fn select_episode(&mut self, n: u16) {
        self.selection.selected_episode_number = n;
        if self.selection.is_tv() {
            self.refresh_embed_url();
        }
    }

    /// Select the episode after (`+1`) or before (`-1`) the active one
    pub fn step_episode(&mut self, direction: i32) {
        let episodes = &self.selection.episodes;
        if episodes.is_empty() {
            return;
        }
        let next = match self.selection.current_episode_index() {
            Some(idx) => (idx as i64 + i64::from(direction)).clamp(0, episodes.len() as i64 - 1),
            None => 0,
        };
        let number = episodes[next as usize].episode_number;
        self.select_episode(number);
    }

    // -------------------------------------------------------------------------
    // Provider
    // -------------------------------------------------------------------------

    pub fn change_provider(&mut self, provider: EmbedProvider) {
        self.selection.selected_provider = provider;
        self.refresh_embed_url();
    }

    /// Switch to the next provider in selector order
    pub fn cycle_provider(&mut self) {
        self.change_provider(self.selection.selected_provider.next());
    }

    fn refresh_embed_url(&mut self) {
        if self.phase == DetailPhase::Closed {
            return;
        }
        let sel = &self.selection;
        self.embed_url = match &sel.selected_item {
            Some(item) => sel.selected_provider.embed_url(
                item.kind,
                item.id,
                sel.selected_season_number,
                sel.selected_episode_number,
            ),
            None => String::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    fn show() -> MediaSummary {
        MediaSummary::new(42, MediaKind::Tv, "Show")
    }

    fn movie() -> MediaSummary {
        MediaSummary::new(7, MediaKind::Movie, "Film")
    }

    fn with_seasons(numbers: &[u16]) -> DetailController {
        let mut ctl = DetailController::default();
        ctl.begin_open(show());
        ctl.selection.seasons = numbers.iter().map(|n| Season::new(*n, 10)).collect();
        ctl.selection.selected_season_number = numbers[0];
        ctl.phase = DetailPhase::TvSeason;
        ctl
    }

    #[test]
    fn test_begin_open_movie() {
        let mut ctl = DetailController::default();
        ctl.begin_open(movie());
        assert_eq!(ctl.phase(), DetailPhase::Movie);
        assert_eq!(ctl.embed_url(), "https://vidsrc.cc/v2/embed/movie/7");
    }

    #[test]
    fn test_begin_open_resets_selection() {
        let mut ctl = with_seasons(&[1, 2, 3]);
        ctl.selection.selected_season_number = 3;
        ctl.select_episode(8);
        ctl.change_provider(EmbedProvider::Videasy);

        ctl.begin_open(show());
        let sel = ctl.selection();
        assert_eq!(sel.selected_season_number, 1);
        assert_eq!(sel.selected_episode_number, 1);
        assert!(sel.seasons.is_empty());
        assert!(sel.episodes.is_empty());
        assert_eq!(sel.selected_provider, EmbedProvider::VidsrcCc);
        assert_eq!(ctl.phase(), DetailPhase::TvLoading);
    }

    #[test]
    fn test_open_uses_configured_default_provider() {
        let mut ctl = DetailController::new(EmbedProvider::VidsrcNet);
        ctl.begin_open(movie());
        assert_eq!(ctl.embed_url(), "https://vidsrc.net/embed/movie/?tmdb=7");
    }

    #[test]
    fn test_season_target_bounds() {
        let ctl = with_seasons(&[1, 2, 4]);
        assert_eq!(ctl.season_target(-1), None);
        assert_eq!(ctl.season_target(1), Some(2));
        assert!(!ctl.prev_enabled());
        assert!(ctl.next_enabled());

        let mut ctl = with_seasons(&[1, 2, 4]);
        ctl.selection.selected_season_number = 4;
        assert_eq!(ctl.season_target(1), None);
        assert_eq!(ctl.season_target(-1), Some(2));
        assert!(ctl.prev_enabled());
        assert!(!ctl.next_enabled());
    }

    #[test]
    fn test_season_target_without_seasons() {
        let mut ctl = DetailController::default();
        ctl.begin_open(show());
        assert_eq!(ctl.season_target(1), None);
        assert!(!ctl.prev_enabled());
        assert!(!ctl.next_enabled());
    }

    #[test]
    fn test_select_episode_updates_tv_embed() {
        let mut ctl = with_seasons(&[2]);
        ctl.selection.selected_season_number = 2;
        ctl.select_episode(5);
        assert_eq!(ctl.embed_url(), "https://vidsrc.cc/v2/embed/tv/42/2/5");
    }

    #[test]
    fn test_select_episode_leaves_movie_embed() {
        let mut ctl = DetailController::default();
        ctl.begin_open(movie());
        ctl.select_episode(3);
        assert_eq!(ctl.selection().selected_episode_number, 3);
        assert_eq!(ctl.embed_url(), "https://vidsrc.cc/v2/embed/movie/7");
    }

    #[test]
    fn test_step_episode_clamps() {
        let mut ctl = with_seasons(&[1]);
        ctl.selection.episodes = (1..=3)
            .map(|n| Episode {
                episode_number: n,
                name: format!("Ep {}", n),
                overview: None,
                still_path: None,
                air_date: None,
                vote_average: None,
            })
            .collect();
        ctl.select_episode(1);

        ctl.step_episode(-1);
        assert_eq!(ctl.selection().selected_episode_number, 1);
        ctl.step_episode(1);
        ctl.step_episode(1);
        ctl.step_episode(1);
        assert_eq!(ctl.selection().selected_episode_number, 3);
    }

    #[test]
    fn test_cycle_provider_recomputes_url() {
        let mut ctl = DetailController::default();
        ctl.begin_open(movie());
        ctl.cycle_provider();
        assert_eq!(ctl.embed_url(), "https://vidsrc.net/embed/movie/?tmdb=7");
        ctl.cycle_provider();
        assert_eq!(ctl.embed_url(), "https://player.videasy.net/movie/7");
    }

    #[test]
    fn test_close_clears_embed_url() {
        let mut ctl = with_seasons(&[1, 2]);
        ctl.select_episode(2);
        assert!(!ctl.embed_url().is_empty());

        ctl.close();
        assert_eq!(ctl.embed_url(), "");
        assert!(!ctl.is_open());
        // Selection left stale until the next open
        assert_eq!(ctl.selection().selected_episode_number, 2);

        // Provider changes while closed do not resurrect the URL
        ctl.cycle_provider();
        assert_eq!(ctl.embed_url(), "");
    }
}
