//! Terminal loop for browsing a ratings filter
//!
//! Draws the tier list next to the query it would commit and drives the
//! filter through one host cycle per event: handle the event, flush queued
//! changes, then refresh from the store before the next frame.

use super::events::{EventResult, poll_and_handle};
use super::theme::Theme;
use super::widgets::{KeyHints, QueryPane, RatingsList};
use crate::filter::{RatingsFilter, Selection};
use crate::store::SearchStore;
use crate::ui::error::{Result, UiError};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io::{self, Stdout};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Smallest terminal the browser will draw into
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 4;

/// Interactive ratings browser
#[derive(Debug, Clone, Default)]
pub struct RatingsRunner {
    theme: Theme,
}

impl RatingsRunner {
    /// Create a runner with the default theme
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the browser until the user quits
    ///
    /// Returns the filter's selection at exit.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no tiers to show, if the terminal is
    /// too small or cannot be set up, or if reading events fails. The
    /// terminal is restored either way.
    pub fn run<S: SearchStore + ?Sized>(
        &self,
        filter: &mut RatingsFilter,
        store: &mut S,
    ) -> Result<Option<Selection>> {
        if filter.tiers().is_empty() {
            return Err(UiError::NoTiers(filter.component_id().to_string()));
        }

        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, filter, store);

        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!("terminal cleanup failed: {e}");
        }

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    fn run_loop<S: SearchStore + ?Sized>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        filter: &mut RatingsFilter,
        store: &mut S,
    ) -> Result<Option<Selection>> {
        let size = terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            return Err(UiError::TerminalTooSmall {
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        loop {
            filter.refresh(store);

            let mut list_area = Rect::default();
            terminal.draw(|frame| list_area = self.render(frame, filter))?;

            match poll_and_handle(filter, list_area, POLL_INTERVAL)? {
                EventResult::Quit => break,
                EventResult::Activated(selection) => {
                    tracing::debug!("activated tier {selection}");
                }
                EventResult::Continue | EventResult::Ignored => {}
            }

            filter.flush(store);
        }

        filter.flush(store);
        Ok(filter.current_value())
    }

    /// Draw one frame, returning the area the tier list occupies
    pub fn render(&self, frame: &mut Frame, filter: &RatingsFilter) -> Rect {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0]);

        frame.render_widget(RatingsList::new(filter, &self.theme), columns[0]);

        let resolved = filter.query();
        frame.render_widget(QueryPane::new(&resolved, &self.theme), columns[1]);

        let status = match filter.current_value() {
            Some(value) => format!("selected {value}"),
            None => String::from("no selection"),
        };
        frame.render_widget(
            KeyHints::new(&self.theme).status(Some(status.as_str())),
            rows[1],
        );

        columns[0]
    }
}
