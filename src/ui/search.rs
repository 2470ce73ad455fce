//! Search overlay renderer
//!
//! Query input on top, results or an empty-state message below.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::search::{SearchOverlay, SearchResults};
use crate::ui::{popup_area, Theme};

/// Render the overlay when visible
pub fn render_search(frame: &mut Frame, area: Rect, overlay: &SearchOverlay, theme: &Theme) {
    if !overlay.visible {
        return;
    }

    let popup = popup_area(area, 80, 80);
    frame.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(popup);

    // Input box with a visible cursor while editing
    let text = if overlay.editing {
        let (before, after): (String, String) = {
            let before = overlay.query.chars().take(overlay.cursor).collect();
            let after = overlay.query.chars().skip(overlay.cursor).collect();
            (before, after)
        };
        format!("⌕ {}│{}", before, after)
    } else {
        format!("⌕ {}", overlay.query)
    };
    let input_border = if overlay.editing {
        theme.border_focused()
    } else {
        theme.border()
    };
    let input = Paragraph::new(text).style(theme.input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(input_border)
            .title(Span::styled(" SEARCH ", theme.title())),
    );
    frame.render_widget(input, chunks[0]);

    let cards = overlay.results.cards();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if overlay.editing {
            theme.border()
        } else {
            theme.border_focused()
        })
        .title(Span::styled(format!(" RESULTS ({}) ", cards.len()), theme.title()))
        .style(theme.base());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if let Some(message) = overlay.results.message() {
        let style = if overlay.results == SearchResults::Failed {
            theme.error()
        } else {
            theme.dimmed()
        };
        let empty = Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let selected = !overlay.editing && i == overlay.selected;
            let year = card.year.map(|y| format!(" ({})", y)).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(if selected { "▸ " } else { "  " }, theme.keybind()),
                Span::styled(
                    card.title().to_string(),
                    if selected {
                        theme.highlighted()
                    } else {
                        theme.text()
                    },
                ),
                Span::styled(year, theme.year()),
                Span::raw(" "),
                Span::styled(format!("[{}]", card.item.kind), theme.secondary()),
                Span::raw(" "),
                Span::styled(card.stars_text(), theme.stars()),
                Span::styled(format!(" {}", card.rating_text), theme.dimmed()),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(overlay.selected));
    frame.render_stateful_widget(List::new(items), inner, &mut state);
}
