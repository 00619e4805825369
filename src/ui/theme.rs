//! Theme and styling configuration.

use ratatui::style::Color;

/// Color theme for the application.
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Highlight color for selected items.
    pub highlight: Color,
    /// Accent color for focused or emphasized text.
    pub accent: Color,
    /// Border color for unfocused panels.
    pub border: Color,
    /// Border color for the focused panel.
    pub border_focused: Color,
    /// Text color for input placeholders and dim hints.
    pub input_placeholder: Color,
    /// Text color for typed input.
    pub input_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            highlight: Color::Cyan,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            input_placeholder: Color::DarkGray,
            input_fg: Color::White,
        }
    }
}

/// The active theme.
pub fn theme() -> Theme {
    Theme::default()
}
