//! Ratatui-based ratings browser
//!
//! Renders a ratings filter in the terminal and feeds keyboard and mouse
//! input back into it.
//!
//! ```text
//! ┌ Rating ───────────┐┌ Query ──────────────────┐
//! │> ★★★★☆ 4 & up     ││{                        │
//! │  ★★★☆☆ 3 & up     ││  "query": {             │
//! │  ★★☆☆☆ 2 & up     ││    "range": { ... }     │
//! └───────────────────┘└─────────────────────────┘
//! ↑↓/jk:move  Enter:apply  q:quit  │ selected 4..=5
//! ```

mod events;
mod runner;
mod theme;
pub mod widgets;

pub use events::{EventResult, handle_key, handle_mouse, poll_and_handle};
pub use runner::RatingsRunner;
pub use theme::Theme;
