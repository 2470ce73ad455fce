//! Catalog view models
//!
//! Turns media summaries into the banner, card rows and the trending grid.
//! Everything here is pure data shaping; `ui::browser` draws the result.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::tmdb::{backdrop_url, poster_url};
use crate::models::{star_rating, MediaSummary};

/// Trending grid layout: 6 columns by 4 rows
pub const GRID_COLUMNS: usize = 6;
pub const GRID_ROWS: usize = 4;
pub const GRID_CAPACITY: usize = GRID_COLUMNS * GRID_ROWS;

pub const GRID_EMPTY_MESSAGE: &str = "No trending titles right now";

pub const BANNER_FALLBACK_TITLE: &str = "FlixTUI";
pub const BANNER_FALLBACK_DESCRIPTION: &str = "Discover thousands of movies and TV shows";

/// Characters of overview kept in the banner
pub const BANNER_OVERVIEW_LIMIT: usize = 150;

// =============================================================================
// Banner
// =============================================================================

/// Hero banner at the top of the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub title: String,
    pub description: String,
    pub backdrop_url: Option<String>,
    /// Item behind the banner, when one was usable
    pub item: Option<MediaSummary>,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            title: BANNER_FALLBACK_TITLE.to_string(),
            description: BANNER_FALLBACK_DESCRIPTION.to_string(),
            backdrop_url: None,
            item: None,
        }
    }
}

impl Banner {
    /// Banner for an item with a backdrop; static fallback otherwise
    pub fn from_item(item: Option<&MediaSummary>) -> Self {
        let Some(item) = item.filter(|i| i.has_backdrop()) else {
            return Self::default();
        };

        let title = if item.has_title() {
            item.title.clone()
        } else {
            BANNER_FALLBACK_TITLE.to_string()
        };

        let description = if item.overview.is_empty() {
            BANNER_FALLBACK_DESCRIPTION.to_string()
        } else {
            let head: String = item.overview.chars().take(BANNER_OVERVIEW_LIMIT).collect();
            format!("{}...", head)
        };

        Self {
            title,
            description,
            backdrop_url: item.backdrop_path.as_deref().map(backdrop_url),
            item: Some(item.clone()),
        }
    }
}

/// Uniform random pick for the banner
pub fn pick_banner<'a, R: Rng + ?Sized>(
    items: &'a [MediaSummary],
    rng: &mut R,
) -> Option<&'a MediaSummary> {
    items.choose(rng)
}

// =============================================================================
// Cards
// =============================================================================

/// Renderable card bound to one media item
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub item: MediaSummary,
    /// 0..=5 filled stars
    pub stars: u8,
    /// Vote average on a five-point scale, one decimal
    pub rating_text: String,
    pub year: Option<u16>,
    pub poster_url: String,
}

impl Card {
    /// Card for an item; `None` when the item has no poster
    pub fn from_item(item: &MediaSummary) -> Option<Self> {
        let poster = item.poster_path.as_deref().filter(|p| !p.is_empty())?;
        let five_point = if item.vote_average.is_finite() {
            item.vote_average.max(0.0) / 2.0
        } else {
            0.0
        };

        Some(Self {
            item: item.clone(),
            stars: star_rating(item.vote_average),
            rating_text: format!("{:.1}", five_point),
            year: item.year(),
            poster_url: poster_url(poster),
        })
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Filled and hollow stars, e.g. `★★★★☆`
    pub fn stars_text(&self) -> String {
        stars_text(self.stars)
    }
}

/// Filled and hollow stars for a 0..=5 rating
pub fn stars_text(stars: u8) -> String {
    let filled = stars.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// One card per item with a poster, in input order
pub fn render_list(items: &[MediaSummary]) -> Vec<Card> {
    items.iter().filter_map(Card::from_item).collect()
}

/// Fixed-size trending grid
#[derive(Debug, Clone, PartialEq)]
pub enum TrendingGrid {
    /// Nothing to show; rendered as the empty-state message
    Empty,
    Cards(Vec<Card>),
}

impl TrendingGrid {
    pub fn cards(&self) -> &[Card] {
        match self {
            TrendingGrid::Empty => &[],
            TrendingGrid::Cards(cards) => cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Cards split into grid rows of `GRID_COLUMNS`
    pub fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.cards().chunks(GRID_COLUMNS)
    }
}

/// Same skip rule as lists, capped to the first `GRID_CAPACITY` cards
pub fn render_trending_grid(items: &[MediaSummary]) -> TrendingGrid {
    let cards: Vec<Card> = items
        .iter()
        .filter_map(Card::from_item)
        .take(GRID_CAPACITY)
        .collect();

    if cards.is_empty() {
        TrendingGrid::Empty
    } else {
        TrendingGrid::Cards(cards)
    }
}

// =============================================================================
// Horizontal card row
// =============================================================================

/// A horizontally scrolling row of cards with a focus cursor
#[derive(Debug, Clone, Default)]
pub struct CardRow {
    pub label: String,
    pub cards: Vec<Card>,
    /// Focused card index
    pub cursor: usize,
    /// First visible card
    pub offset: usize,
    /// Still waiting for the feed
    pub loading: bool,
}

impl CardRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading: true,
            ..Self::default()
        }
    }

    /// Replace the cards from a fresh feed
    pub fn set_items(&mut self, items: &[MediaSummary]) {
        self.cards = render_list(items);
        self.cursor = 0;
        self.offset = 0;
        self.loading = false;
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.offset {
                self.offset = self.cursor;
            }
        }
    }

    pub fn right(&mut self) {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
        }
    }

    /// Jump back to the first card
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Keep the cursor inside a viewport `visible` cards wide
    pub fn scroll_into_view(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: u64, poster: bool) -> MediaSummary {
        let mut item = MediaSummary::new(id, MediaKind::Movie, format!("Movie {}", id));
        if poster {
            item.poster_path = Some(format!("/poster{}.jpg", id));
        }
        item.vote_average = 7.8;
        item.release_date = Some("2023-05-01".into());
        item
    }

    #[test]
    fn test_card_fields() {
        let card = Card::from_item(&item(1, true)).unwrap();
        assert_eq!(card.title(), "Movie 1");
        assert_eq!(card.stars, 4);
        assert_eq!(card.stars_text(), "★★★★☆");
        assert_eq!(card.rating_text, "3.9");
        assert_eq!(card.year, Some(2023));
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w500/poster1.jpg");
    }

    #[test]
    fn test_card_year_from_first_air_date() {
        let mut show = item(2, true);
        show.kind = MediaKind::Tv;
        show.release_date = None;
        show.first_air_date = Some("2008-01-20".into());
        assert_eq!(Card::from_item(&show).unwrap().year, Some(2008));
    }

    #[test]
    fn test_list_skips_items_without_poster() {
        let items = vec![item(1, true), item(2, false), item(3, true)];
        let cards = render_list(&items);
        let ids: Vec<u64> = cards.iter().map(|c| c.item.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_grid_caps_at_capacity() {
        let items: Vec<MediaSummary> = (0..40).map(|i| item(i, true)).collect();
        let grid = render_trending_grid(&items);
        assert_eq!(grid.len(), GRID_CAPACITY);
        assert_eq!(grid.rows().count(), GRID_ROWS);
        assert!(grid.rows().all(|row| row.len() == GRID_COLUMNS));
    }

    #[test]
    fn test_grid_cap_counts_only_qualifying_items() {
        // Poster-less items do not use up grid slots
        let items: Vec<MediaSummary> = (0..60).map(|i| item(i, i % 2 == 0)).collect();
        let grid = render_trending_grid(&items);
        assert_eq!(grid.len(), GRID_CAPACITY);
        assert!(grid.cards().iter().all(|c| c.item.id % 2 == 0));
        assert_eq!(grid.cards().last().unwrap().item.id, 46);
    }

    #[test]
    fn test_grid_empty_state() {
        assert_eq!(render_trending_grid(&[]), TrendingGrid::Empty);
        assert_eq!(
            render_trending_grid(&[item(1, false), item(2, false)]),
            TrendingGrid::Empty
        );
    }

    #[test]
    fn test_banner_fallback_without_backdrop() {
        assert_eq!(Banner::from_item(None), Banner::default());
        let banner = Banner::from_item(Some(&item(1, true)));
        assert_eq!(banner.title, BANNER_FALLBACK_TITLE);
        assert!(banner.item.is_none());
    }

    #[test]
    fn test_banner_truncates_overview() {
        let mut movie = item(1, true);
        movie.backdrop_path = Some("/b.jpg".into());
        movie.overview = "x".repeat(400);
        let banner = Banner::from_item(Some(&movie));
        assert_eq!(banner.title, "Movie 1");
        assert_eq!(banner.description.chars().count(), BANNER_OVERVIEW_LIMIT + 3);
        assert!(banner.description.ends_with("..."));
        assert_eq!(
            banner.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/b.jpg")
        );
    }

    #[test]
    fn test_pick_banner() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_banner(&[], &mut rng).is_none());

        let items = vec![item(1, true), item(2, true), item(3, true)];
        let picked = pick_banner(&items, &mut rng).unwrap();
        assert!(items.contains(picked));
    }

    #[test]
    fn test_card_row_scrolling() {
        let mut row = CardRow::new("Movies");
        assert!(row.loading);
        row.set_items(&(0..10).map(|i| item(i, true)).collect::<Vec<_>>());
        assert!(!row.loading);

        row.left();
        assert_eq!(row.cursor, 0);

        for _ in 0..5 {
            row.right();
        }
        row.scroll_into_view(3);
        assert_eq!(row.cursor, 5);
        assert_eq!(row.offset, 3);

        for _ in 0..20 {
            row.right();
        }
        assert_eq!(row.cursor, 9);

        row.rewind();
        assert_eq!((row.cursor, row.offset), (0, 0));
    }
}
