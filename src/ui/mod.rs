//! Terminal UI for ratings filters
//!
//! The filter itself knows nothing about terminals. This module draws it
//! with ratatui and maps crossterm input onto cursor moves and tier clicks.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use starfilter::config::FilterConfig;
//! use starfilter::filter::{RatingsFilter, RatingsFilterProps};
//! use starfilter::store::MemoryStore;
//! use starfilter::ui::ratatui_adapter::RatingsRunner;
//!
//! let mut store = MemoryStore::new();
//! let props = RatingsFilterProps::new(FilterConfig::new("ratings", "rating"));
//! let mut filter = RatingsFilter::new(props, &mut store);
//!
//! let selection = RatingsRunner::new().run(&mut filter, &mut store)?;
//! println!("{selection:?}");
//! filter.teardown(&mut store);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
