//! Color theme definitions for the ratings TUI
//!
//! Defines colors and styles used by the ratings list and its side panes.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color for filled stars
    pub star: Color,
    /// Color for dimmed stars
    pub dimmed_star: Color,
    /// Background for the active tier
    pub active_bg: Color,
    /// Foreground for the active tier
    pub active_fg: Color,
    /// Color for the cursor indicator
    pub cursor: Color,
    /// Color for tier labels
    pub label: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for the committed query
    pub query: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            star: Color::Yellow,
            dimmed_star: Color::DarkGray,
            active_bg: Color::Blue,
            active_fg: Color::White,
            cursor: Color::Cyan,
            label: Color::White,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            query: Color::Green,
        }
    }

    /// Style for the row of the active tier
    #[must_use]
    pub fn active_style(&self) -> Style {
        Style::default()
            .bg(self.active_bg)
            .fg(self.active_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for filled stars
    #[must_use]
    pub fn star_style(&self) -> Style {
        Style::default().fg(self.star)
    }

    /// Style for dimmed stars
    #[must_use]
    pub fn dimmed_star_style(&self) -> Style {
        Style::default().fg(self.dimmed_star)
    }

    /// Style for tier labels
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for the committed query text
    #[must_use]
    pub fn query_style(&self) -> Style {
        Style::default().fg(self.query)
    }
}
