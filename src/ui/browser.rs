//! Home screen renderer
//!
//! Banner on top, then the three horizontally scrolling rows and the
//! trending grid. Sections scroll vertically so the focused one is always
//! on screen.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, GRID_SECTION};
use crate::catalog::{Banner, Card, CardRow, TrendingGrid, GRID_COLUMNS, GRID_EMPTY_MESSAGE};
use crate::ui::Theme;

/// Card cell width in a horizontal row, borders included
pub const CARD_WIDTH: u16 = 24;
/// Card height, borders included
pub const CARD_HEIGHT: u16 = 5;

const BANNER_HEIGHT: u16 = 6;
const ROW_HEIGHT: u16 = CARD_HEIGHT + 1;

/// How many cards of a row fit across `width` columns
pub fn cards_per_row(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// Render the whole home screen into `area`
pub fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    if app.loading {
        render_loading(frame, area, theme);
        return;
    }

    let grid_height = 1 + CARD_HEIGHT * app.grid.rows().count().max(1) as u16;
    let heights = [BANNER_HEIGHT, ROW_HEIGHT, ROW_HEIGHT, ROW_HEIGHT, grid_height];

    // Section 0 is the banner; focus indexes start at 1
    let focused = app.focus + 1;
    let start = first_visible_section(&heights, focused, area.height);

    let mut y = area.y;
    for (section, height) in heights.iter().enumerate().skip(start) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height: (*height).min(remaining),
        };
        match section {
            0 => render_banner(frame, rect, &app.banner, theme),
            4 => render_grid(
                frame,
                rect,
                &app.grid,
                (app.focus == GRID_SECTION).then_some(app.grid_cursor),
                theme,
            ),
            n => render_row(frame, rect, &app.rows[n - 1], app.focus == n - 1, theme),
        }
        y += rect.height;
    }
}

/// Earliest section from which everything up to `focused` still fits
fn first_visible_section(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut start = 0;
    while start < focused {
        let needed: u16 = heights[start..=focused].iter().sum();
        if needed <= available {
            break;
        }
        start += 1;
    }
    start
}

fn render_loading(frame: &mut Frame, area: Rect, theme: &Theme) {
    let top = area.height / 2;
    let mut lines = vec![Line::from(""); top.saturating_sub(1) as usize];
    lines.push(Line::from(Span::styled("FlixTUI", theme.title())));
    lines.push(Line::from(Span::styled(
        "⟳ Loading trending titles...",
        theme.dimmed(),
    )));
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Hero banner
pub fn render_banner(frame: &mut Frame, area: Rect, banner: &Banner, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(banner.title.clone(), theme.headline())),
        Line::from(Span::styled(banner.description.clone(), theme.text())),
    ];
    if let Some(url) = &banner.backdrop_url {
        lines.push(Line::from(Span::styled(url.clone(), theme.link())));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border()),
    );
    frame.render_widget(para, area);
}

/// One labelled, horizontally scrolling row of cards
pub fn render_row(frame: &mut Frame, area: Rect, row: &CardRow, focused: bool, theme: &Theme) {
    let label_style = if focused {
        theme.title()
    } else {
        theme.headline()
    };

    let visible = cards_per_row(area.width);
    let more_left = row.offset > 0;
    let more_right = row.offset + visible < row.cards.len();
    let label = Line::from(vec![
        Span::styled(row.label.clone(), label_style),
        Span::raw("  "),
        Span::styled(if more_left { "◀" } else { " " }, theme.dimmed()),
        Span::styled(if more_right { "▶" } else { " " }, theme.dimmed()),
    ]);
    frame.render_widget(Paragraph::new(label), Rect { height: 1, ..area });

    let body = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    if row.loading {
        frame.render_widget(Paragraph::new(Span::styled("Loading...", theme.dimmed())), body);
        return;
    }
    if row.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Nothing to show", theme.dimmed())),
            body,
        );
        return;
    }

    for (slot, (idx, card)) in row
        .cards
        .iter()
        .enumerate()
        .skip(row.offset)
        .take(visible)
        .enumerate()
    {
        let cell = Rect {
            x: body.x + slot as u16 * CARD_WIDTH,
            width: CARD_WIDTH.min(body.right().saturating_sub(body.x + slot as u16 * CARD_WIDTH)),
            ..body
        };
        render_card(frame, cell, card, focused && idx == row.cursor, theme);
    }
}

/// The fixed 6×4 trending grid, or its empty-state message
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    grid: &TrendingGrid,
    cursor: Option<usize>,
    theme: &Theme,
) {
    let label_style = if cursor.is_some() {
        theme.title()
    } else {
        theme.headline()
    };
    frame.render_widget(
        Paragraph::new(Span::styled("Trending Now", label_style)),
        Rect { height: 1, ..area },
    );
    let body = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    if grid.is_empty() {
        let empty = Paragraph::new(GRID_EMPTY_MESSAGE)
            .style(theme.dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, body);
        return;
    }

    // Scroll whole grid rows when the grid is taller than the body
    let visible_rows = (body.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = cursor.unwrap_or(0) / GRID_COLUMNS;
    let row_offset = (cursor_row + 1).saturating_sub(visible_rows);

    let cell_width = body.width / GRID_COLUMNS as u16;
    for (r, cards) in grid.rows().enumerate().skip(row_offset).take(visible_rows) {
        let y = body.y + (r - row_offset) as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(body.bottom().saturating_sub(y));
        for (c, card) in cards.iter().enumerate() {
            let cell = Rect {
                x: body.x + c as u16 * cell_width,
                y,
                width: cell_width,
                height,
            };
            let idx = r * GRID_COLUMNS + c;
            render_card(frame, cell, card, cursor == Some(idx), theme);
        }
    }
}

/// A single card: title, stars with the five-point rating, year
pub fn render_card(frame: &mut Frame, area: Rect, card: &Card, focused: bool, theme: &Theme) {
    if area.width < 3 || area.height < 2 {
        return;
    }

    let title_style = if focused {
        theme.highlighted()
    } else {
        theme.text()
    };
    let year = card
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());

    let lines = vec![
        Line::from(Span::styled(card.title().to_string(), title_style)),
        Line::from(vec![
            Span::styled(card.stars_text(), theme.stars()),
            Span::raw(" "),
            Span::styled(card.rating_text.clone(), theme.dimmed()),
        ]),
        Line::from(vec![
            Span::styled(year, theme.year()),
            Span::raw(" · "),
            Span::styled(card.item.kind.to_string(), theme.dimmed()),
        ]),
    ];

    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    let para = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    );
    frame.render_widget(para, area);
}
