//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Interactive ratings list in the terminal (default)
//! - **query**: Print the query committed for a selection
//!
//! # Examples
//!
//! ```bash
//! starfilter --config ratings.toml
//! starfilter query 4,5
//! starfilter --field stars --nested reviews query 3..5 --compact
//! ```

use crate::config::FilterConfig;
use crate::filter::Selection;
use clap::{Parser, Subcommand};
use config::ConfigError;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "starfilter")]
#[command(about = "A star-rating range filter for search stores", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Field to filter on (overrides config)
    #[arg(long = "field", value_name = "FIELD", global = true)]
    pub field: Option<String>,

    /// Nested path the field lives under (overrides config)
    #[arg(long = "nested", value_name = "PATH", global = true)]
    pub nested: Option<String>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Browse the rating tiers interactively (default)
    #[command(visible_alias = "b")]
    Browse,

    /// Print the query committed for a selection
    #[command(visible_alias = "q")]
    Query {
        /// Selection as `START,END` or `START..END`; defaults to the configured value
        #[arg(value_name = "SELECTION", value_parser = parse_selection)]
        selection: Option<Selection>,

        /// Print JSON on a single line
        #[arg(long = "compact")]
        compact: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command to run, `browse` when none was given
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }

    /// Build the filter configuration from the config file and overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load_config(&self) -> Result<FilterConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => FilterConfig::load(path)?,
            None => FilterConfig::default(),
        };

        if let Some(field) = &self.field {
            config.data_field.clone_from(field);
        }
        if let Some(nested) = &self.nested {
            config.nested_field = Some(nested.clone());
        }

        Ok(config)
    }
}

/// Parse a selection from `START,END`, `START..END` or `START..=END`
///
/// # Errors
///
/// Returns a message if either bound is missing, not a number, or not finite.
pub fn parse_selection(input: &str) -> Result<Selection, String> {
    let (start, end) = input
        .split_once("..=")
        .or_else(|| input.split_once(".."))
        .or_else(|| input.split_once(','))
        .ok_or_else(|| format!("expected START,END or START..END, got '{input}'"))?;

    let parse = |bound: &str| {
        let bound = bound.trim();
        let value = bound
            .parse::<f64>()
            .map_err(|e| format!("invalid bound '{bound}': {e}"))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("bound '{bound}' is not a finite number"))
        }
    };

    Ok(Selection::new(parse(start)?, parse(end)?))
}
