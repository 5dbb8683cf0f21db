//! Ratings list widget
//!
//! One row per tier: cursor marker, a five-star bar with `floor(start)`
//! filled stars, then the tier label. The row matching the current
//! selection is highlighted.

use crate::filter::{RatingTier, RatingsFilter};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Number of stars in a full bar
pub const MAX_STARS: usize = 5;

/// Filled star count for a tier, clamped to `0..=MAX_STARS`
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn filled_stars(tier: &RatingTier) -> usize {
    if tier.start.is_nan() {
        return 0;
    }
    (tier.start.floor().max(0.0) as usize).min(MAX_STARS)
}

/// First visible tier index so that `cursor` stays on screen
#[must_use]
pub const fn scroll_offset(cursor: usize, visible_height: usize) -> usize {
    if visible_height == 0 || cursor < visible_height {
        0
    } else {
        cursor + 1 - visible_height
    }
}

/// Tier index under a terminal cell, for mouse hit testing
///
/// `area` is the full area the list was rendered into, border included.
#[must_use]
pub fn tier_at(filter: &RatingsFilter, area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = list_block(None).inner(area);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }

    let offset = scroll_offset(filter.cursor(), inner.height as usize);
    let index = offset + (row - inner.y) as usize;
    (index < filter.tiers().len()).then_some(index)
}

fn list_block(title: Option<&str>) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL);
    match title {
        Some(title) => block.title(format!(" {title} ")),
        None => block,
    }
}

/// Ratings list widget
pub struct RatingsList<'a> {
    /// Filter being rendered
    filter: &'a RatingsFilter,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether to draw the cursor marker
    show_cursor: bool,
}

impl<'a> RatingsList<'a> {
    /// Create a new ratings list widget
    #[must_use]
    pub const fn new(filter: &'a RatingsFilter, theme: &'a Theme) -> Self {
        Self {
            filter,
            theme,
            show_cursor: true,
        }
    }

    /// Hide or show the cursor marker
    #[must_use]
    pub const fn show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    fn render_tier(&self, tier: &RatingTier, is_cursor: bool) -> ListItem<'a> {
        let config = &self.filter.props().config;
        let filled = filled_stars(tier);
        let is_active = tier.is_active(self.filter.current_value().as_ref());

        let cursor_char = if self.show_cursor && is_cursor { ">" } else { " " };
        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(config.icon.repeat(filled), self.theme.star_style()),
            Span::styled(
                config.dimmed_icon.repeat(MAX_STARS - filled),
                self.theme.dimmed_star_style(),
            ),
        ];

        if let Some(label) = &tier.label {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label.clone(), self.theme.label_style()));
        }

        let item = ListItem::new(Line::from(spans));
        if is_active {
            item.style(self.theme.active_style())
        } else {
            item
        }
    }
}

impl Widget for RatingsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = list_block(self.filter.props().config.title.as_deref())
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let tiers = self.filter.tiers();
        let start = scroll_offset(self.filter.cursor(), inner.height as usize).min(tiers.len());
        let end = (start + inner.height as usize).min(tiers.len());

        let items: Vec<ListItem> = tiers[start..end]
            .iter()
            .enumerate()
            .map(|(offset, tier)| self.render_tier(tier, start + offset == self.filter.cursor()))
            .collect();

        List::new(items).render(inner, buf);
    }
}
