//! Event handling for the ratings browser
//!
//! Maps keyboard and mouse events onto cursor moves and tier clicks.

use super::widgets::tier_at;
use crate::filter::{RatingsFilter, Selection};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// A tier was clicked with these bounds
    Activated(Selection),
    /// Leave the browser
    Quit,
    /// No action taken
    Ignored,
}

/// Handle a key press
pub fn handle_key(filter: &mut RatingsFilter, key: KeyEvent) -> EventResult {
    if key.kind == KeyEventKind::Release {
        return EventResult::Ignored;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            EventResult::Quit
        }

        (KeyCode::Up | KeyCode::Char('k'), _) => {
            filter.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down | KeyCode::Char('j'), _) => {
            filter.cursor_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            filter.cursor_first();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            filter.cursor_last();
            EventResult::Continue
        }

        (KeyCode::Enter | KeyCode::Char(' '), _) => filter
            .activate()
            .map_or(EventResult::Ignored, EventResult::Activated),

        _ => EventResult::Ignored,
    }
}

/// Handle a mouse event
///
/// `list_area` is where the ratings list was last drawn.
pub fn handle_mouse(filter: &mut RatingsFilter, mouse: MouseEvent, list_area: Rect) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            filter.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            filter.cursor_down();
            EventResult::Continue
        }
        MouseEventKind::Down(MouseButton::Left) => {
            tier_at(filter, list_area, mouse.column, mouse.row)
                .and_then(|index| filter.select_tier(index))
                .map_or(EventResult::Ignored, EventResult::Activated)
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(
    filter: &mut RatingsFilter,
    list_area: Rect,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(filter, key),
        Event::Mouse(mouse) => handle_mouse(filter, mouse, list_area),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
