//! Query pane widget showing what the filter would commit

use crate::filter::ResolvedQuery;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use serde_json::{Map, Value};

/// Pretty JSON for a resolved query, or `None` when there is no filter
///
/// Options are merged in next to the `query` key, the way a custom query
/// returned them.
#[must_use]
pub fn query_json(resolved: &ResolvedQuery) -> Option<String> {
    let query = resolved.query.as_ref()?;

    let mut object = Map::new();
    object.insert("query".to_string(), query.clone());
    if let Some(options) = &resolved.options {
        for (key, value) in options {
            object.insert(key.clone(), value.clone());
        }
    }

    serde_json::to_string_pretty(&Value::Object(object)).ok()
}

/// Query pane widget
pub struct QueryPane<'a> {
    /// Query to display
    resolved: &'a ResolvedQuery,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> QueryPane<'a> {
    /// Create a new query pane widget
    #[must_use]
    pub const fn new(resolved: &'a ResolvedQuery, theme: &'a Theme) -> Self {
        Self { resolved, theme }
    }
}

impl Widget for QueryPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = query_json(self.resolved).map_or_else(
            || vec![Line::styled("No active filter", self.theme.dimmed_style())],
            |json| {
                json.lines()
                    .map(|line| Line::styled(line.to_string(), self.theme.query_style()))
                    .collect()
            },
        );

        let block = Block::default()
            .title(" Query ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
