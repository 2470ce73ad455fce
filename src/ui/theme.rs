//! Dark and light palettes for FlixTUI
//!
//! The palette is chosen at startup from the persisted preference and
//! swapped at runtime by the theme toggle.

use ratatui::style::{Color, Modifier, Style};

use crate::models::ThemePreference;

/// Colour palette plus style helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub preference: ThemePreference,
    pub background: Color,
    /// Panels, cards, status bar
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    /// Star ratings and key hints
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    /// Default dark palette (streaming-red on near black)
    pub const fn dark() -> Self {
        Self {
            preference: ThemePreference::Dark,
            background: Color::Rgb(0x14, 0x14, 0x14),
            surface: Color::Rgb(0x23, 0x23, 0x23),
            primary: Color::Rgb(0xe5, 0x09, 0x14),
            secondary: Color::Rgb(0x46, 0xd3, 0x69),
            accent: Color::Rgb(0xff, 0xc1, 0x07),
            text: Color::Rgb(0xf5, 0xf5, 0xf1),
            dim: Color::Rgb(0x8c, 0x8c, 0x8c),
            error: Color::Rgb(0xff, 0x5a, 0x5f),
            border: Color::Rgb(0x40, 0x40, 0x40),
        }
    }

    /// Light palette
    pub const fn light() -> Self {
        Self {
            preference: ThemePreference::Light,
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            surface: Color::Rgb(0xec, 0xec, 0xec),
            primary: Color::Rgb(0xb2, 0x07, 0x10),
            secondary: Color::Rgb(0x1b, 0x7a, 0x3a),
            accent: Color::Rgb(0x8a, 0x5a, 0x00),
            text: Color::Rgb(0x1a, 0x1a, 0x1a),
            dim: Color::Rgb(0x5c, 0x5c, 0x5c),
            error: Color::Rgb(0xc6, 0x28, 0x28),
            border: Color::Rgb(0xb0, 0xb0, 0xb0),
        }
    }

    pub const fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::dark(),
            ThemePreference::Light => Self::light(),
        }
    }

    /// The other palette
    pub const fn toggled(&self) -> Self {
        match self.preference {
            ThemePreference::Dark => Self::light(),
            ThemePreference::Light => Self::dark(),
        }
    }

    /// Icon shown next to the toggle hint
    pub fn icon(&self) -> &'static str {
        match self.preference {
            ThemePreference::Dark => "☾",
            ThemePreference::Light => "☀",
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Banner headline
    pub fn headline(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn stars(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused card / active episode
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled control (e.g. season arrow at the edge)
    pub fn disabled(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Year/date metadata
    pub fn year(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::UNDERLINED)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (>= 4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (>= 3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    fn palettes() -> [Theme; 2] {
        [Theme::dark(), Theme::light()]
    }

    #[test]
    fn test_all_theme_colors_are_rgb() {
        for theme in palettes() {
            for color in [
                theme.background,
                theme.surface,
                theme.primary,
                theme.secondary,
                theme.accent,
                theme.text,
                theme.dim,
                theme.error,
                theme.border,
            ] {
                assert!(color_to_rgb(color).is_some());
            }
        }
    }

    #[test]
    fn test_text_contrast_against_background() {
        for theme in palettes() {
            let ratio = contrast_ratio(rgb(theme.text), rgb(theme.background));
            assert!(
                meets_wcag_aa(rgb(theme.text), rgb(theme.background)),
                "{} text should meet WCAG AA (got {:.2}:1)",
                theme.preference,
                ratio
            );
        }
    }

    #[test]
    fn test_accent_colors_readable_as_large_text() {
        for theme in palettes() {
            let bg = rgb(theme.background);
            for (name, color) in [
                ("primary", theme.primary),
                ("accent", theme.accent),
                ("error", theme.error),
                ("dim", theme.dim),
            ] {
                assert!(
                    meets_wcag_aa_large(rgb(color), bg),
                    "{} {} on background is too faint ({:.2}:1)",
                    theme.preference,
                    name,
                    contrast_ratio(rgb(color), bg)
                );
            }
        }
    }

    #[test]
    fn test_toggle_switches_palette() {
        assert_eq!(Theme::dark().toggled(), Theme::light());
        assert_eq!(Theme::light().toggled(), Theme::dark());
        assert_eq!(
            Theme::for_preference(ThemePreference::Light).preference,
            ThemePreference::Light
        );
        assert_ne!(Theme::dark().icon(), Theme::light().icon());
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
