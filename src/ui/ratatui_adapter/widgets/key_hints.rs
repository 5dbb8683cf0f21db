//! One-line key hint bar for the ratings browser

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key and action pairs shown by default
pub const DEFAULT_HINTS: &[(&str, &str)] = &[
    ("↑↓/jk", "move"),
    ("Enter", "apply"),
    ("q", "quit"),
];

/// Key hint bar widget
pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
    /// Extra status text shown after the hints
    status: Option<&'a str>,
}

impl<'a> KeyHints<'a> {
    /// Create a hint bar with the default hints
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            hints: DEFAULT_HINTS,
            theme,
            status: None,
        }
    }

    /// Replace the displayed hints
    #[must_use]
    pub const fn hints(mut self, hints: &'a [(&'a str, &'a str)]) -> Self {
        self.hints = hints;
        self
    }

    /// Show a status message after the hints
    #[must_use]
    pub const fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(*key, self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(*action));
        }

        if let Some(status) = self.status {
            spans.push(Span::styled("  │ ", self.theme.dimmed_style()));
            spans.push(Span::styled(status, self.theme.query_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
