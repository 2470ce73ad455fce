//! Terminal UI components
//!
//! Built with ratatui. Every renderer takes `&App` (or the model it
//! draws) plus the active [`Theme`], and never mutates state.

pub mod browser;
pub mod detail;
pub mod search;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

pub use theme::Theme;

const DISCLAIMER: &str = "FlixTUI does not host any content. Metadata comes from \
    The Movie Database (TMDB) and playback links point to third-party embed \
    providers. You are responsible for how you use them.";

/// Centered rect taking `percent_x` × `percent_y` of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw one frame: header, home screen, status bar, then any open modal
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    browser::render_home(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    search::render_search(frame, area, &app.search, theme);
    detail::render_detail(frame, area, &app.detail, theme);
    if app.disclaimer {
        render_disclaimer(frame, area, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let header = Line::from(vec![
        Span::styled(" FLIX", theme.title()),
        Span::styled("TUI ", theme.headline()),
        Span::styled(format!(" {} ", theme.icon()), theme.keybind()),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hints = [
        ("/", "search"),
        ("↵", "open"),
        ("g", "top"),
        ("t", "theme"),
        ("?", "about"),
        ("q", "quit"),
    ];
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), theme.keybind()));
        spans.push(Span::styled(format!("{} ", label), theme.dimmed()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.status_bar()), area);
}

fn render_disclaimer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = popup_area(area, 60, 40);
    frame.render_widget(Clear, popup);

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(DISCLAIMER, theme.text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ESC ", theme.keybind()),
            Span::styled("close", theme.dimmed()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme.border_focused())
            .title(Span::styled(" DISCLAIMER ", theme.title()))
            .style(theme.base()),
    );
    frame.render_widget(para, popup);
}
