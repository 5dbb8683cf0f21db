//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// IO error during terminal operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The terminal is too small to draw the browser
    #[error("Terminal too small: need at least {min_width}x{min_height}")]
    TerminalTooSmall {
        /// Minimum columns
        min_width: u16,
        /// Minimum rows
        min_height: u16,
    },

    /// Nothing to browse
    #[error("No rating tiers configured for '{0}'")]
    NoTiers(String),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
