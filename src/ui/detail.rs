//! Detail modal renderer
//!
//! Info column on the left (title, rating, date, overview, poster), the
//! provider selector and embed URL, and for TV titles the season navigator
//! with its episode list.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::api::tmdb::poster_url;
use crate::api::EmbedProvider;
use crate::catalog::stars_text;
use crate::detail::{DetailController, DetailPhase, NO_EPISODES_MESSAGE, NO_SEASONS_MESSAGE};
use crate::models::{star_rating, MediaSummary};
use crate::ui::{popup_area, Theme};

/// Render the detail modal when it is open
pub fn render_detail(frame: &mut Frame, area: Rect, detail: &DetailController, theme: &Theme) {
    let Some(item) = detail.item().filter(|_| detail.is_open()) else {
        return;
    };

    let popup = popup_area(area, 90, 90);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(theme.border_focused())
        .title(Span::styled(format!(" {} ", item.title), theme.title()))
        .title_bottom(Line::from(vec![
            Span::styled(" ←→ ", theme.keybind()),
            Span::styled("season ", theme.dimmed()),
            Span::styled(" ↑↓ ", theme.keybind()),
            Span::styled("episode ", theme.dimmed()),
            Span::styled(" p ", theme.keybind()),
            Span::styled("provider ", theme.dimmed()),
            Span::styled(" ESC ", theme.keybind()),
            Span::styled("close ", theme.dimmed()),
        ]))
        .style(theme.base());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(inner);

    render_player(frame, sections[0], detail, theme);

    // The episode panel only exists for TV titles
    if detail.phase() == DetailPhase::Movie {
        render_info(frame, sections[1], item, theme);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(sections[1]);
    render_info(frame, columns[0], item, theme);
    render_episodes(frame, columns[1], detail, theme);
}

/// Provider selector and the embed URL it produces
fn render_player(frame: &mut Frame, area: Rect, detail: &DetailController, theme: &Theme) {
    let current = detail.selection().selected_provider;
    let mut providers = vec![Span::styled("Provider: ", theme.dimmed())];
    for (i, provider) in EmbedProvider::ALL.iter().enumerate() {
        let style = if *provider == current {
            theme.highlighted()
        } else {
            theme.text()
        };
        providers.push(Span::styled(format!(" {} {} ", i + 1, provider), style));
        providers.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(providers),
        Line::from(vec![
            Span::styled("▶ ", theme.secondary()),
            Span::styled(detail.embed_url().to_string(), theme.link()),
        ]),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border()),
    );
    frame.render_widget(para, area);
}

fn render_info(frame: &mut Frame, area: Rect, item: &MediaSummary, theme: &Theme) {
    let rating = if item.vote_average.is_finite() && item.vote_average > 0.0 {
        format!("{:.1}/5", item.vote_average / 2.0)
    } else {
        "N/A".to_string()
    };

    let mut lines = vec![
        Line::from(Span::styled(item.title.clone(), theme.headline())),
        Line::from(vec![
            Span::styled(stars_text(star_rating(item.vote_average)), theme.stars()),
            Span::raw(" "),
            Span::styled(rating, theme.text()),
            Span::raw("  "),
            Span::styled(item.kind.to_string(), theme.dimmed()),
        ]),
        Line::from(Span::styled(
            item.date().unwrap_or("Unknown date").to_string(),
            theme.year(),
        )),
        Line::from(""),
    ];

    if item.overview.is_empty() {
        lines.push(Line::from(Span::styled(
            "No overview available.",
            theme.dimmed(),
        )));
    } else {
        lines.push(Line::from(Span::styled(item.overview.clone(), theme.text())));
    }

    if let Some(path) = item.poster_path.as_deref().filter(|p| !p.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Poster: ", theme.dimmed()),
            Span::styled(poster_url(path), theme.link()),
        ]));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Season navigator plus the episode list or its empty state
fn render_episodes(frame: &mut Frame, area: Rect, detail: &DetailController, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let message = |text: &str| Paragraph::new(text.to_string()).style(theme.dimmed());

    match detail.phase() {
        DetailPhase::TvLoading => {
            frame.render_widget(message("Loading seasons..."), inner);
            return;
        }
        DetailPhase::TvNoSeasons => {
            frame.render_widget(message(NO_SEASONS_MESSAGE), inner);
            return;
        }
        _ => {}
    }

    let selection = detail.selection();
    let arrow = |enabled: bool, glyph: &'static str| {
        Span::styled(
            glyph,
            if enabled {
                theme.keybind()
            } else {
                theme.disabled()
            },
        )
    };
    let nav = Line::from(vec![
        arrow(detail.prev_enabled(), "◀ "),
        Span::styled(
            format!("Season {}", selection.selected_season_number),
            theme.headline(),
        ),
        arrow(detail.next_enabled(), " ▶"),
        Span::styled(
            format!("   ({} of {})", season_position(detail), selection.seasons.len()),
            theme.dimmed(),
        ),
    ]);
    frame.render_widget(Paragraph::new(nav), parts[0]);

    if selection.episodes.is_empty() {
        frame.render_widget(message(NO_EPISODES_MESSAGE), parts[1]);
        return;
    }

    let items: Vec<ListItem> = selection
        .episodes
        .iter()
        .map(|ep| {
            let active = ep.episode_number == selection.selected_episode_number;
            let marker = if active { "▸ " } else { "  " };
            let mut spans = vec![
                Span::styled(marker, theme.keybind()),
                Span::styled(
                    format!("{:>2}. {}", ep.episode_number, ep.display_name()),
                    if active {
                        theme.highlighted()
                    } else {
                        theme.text()
                    },
                ),
            ];
            if let Some(rating) = ep.rating_text() {
                spans.push(Span::styled(format!("  ★ {}", rating), theme.stars()));
            }
            if let Some(date) = &ep.air_date {
                spans.push(Span::styled(format!("  {}", date), theme.dimmed()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default().with_selected(selection.current_episode_index());
    frame.render_stateful_widget(List::new(items), parts[1], &mut state);
}

/// 1-based position of the selected season
fn season_position(detail: &DetailController) -> usize {
    detail
        .selection()
        .current_season_index()
        .map(|i| i + 1)
        .unwrap_or(0)
}
