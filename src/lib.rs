//! Starfilter - a star-rating range filter for reactive search stores
//!
//! This library provides a `RatingsFilter` component that shows a list of
//! rating tiers, keeps the chosen range in sync with a search store, and
//! derives the range query the store should apply.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod filter;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum StarfilterError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
