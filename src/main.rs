//! Starfilter CLI application entry point
//!
//! Builds a ratings filter from a TOML config, attaches it to an in-memory
//! store, and either browses the tiers in the terminal or prints the query
//! committed for a selection.
//!
//! # Usage
//!
//! ```bash
//! # Browse tiers interactively (default command)
//! starfilter --config ratings.toml
//!
//! # Print the query for a selection
//! starfilter query 4,5
//! starfilter --nested reviews query 3..5 --compact
//! ```

use colored::Colorize;
use starfilter::{
    StarfilterError,
    cli::{Cli, Commands},
    filter::{RatingsFilter, RatingsFilterProps, Selection},
    store::MemoryStore,
    ui::ratatui_adapter::RatingsRunner,
};

type Result<T> = std::result::Result<T, StarfilterError>;

/// Print the last query committed for `component_id` as JSON
///
/// # Errors
///
/// Returns `StarfilterError` if the commit cannot be serialized.
fn print_commit(store: &MemoryStore, component_id: &str, compact: bool, quiet: bool) -> Result<()> {
    let Some(update) = store.last_commit(component_id) else {
        if !quiet {
            eprintln!("{}", "No query committed".yellow());
        }
        return Ok(());
    };

    let json = if compact {
        serde_json::to_string(update)?
    } else {
        serde_json::to_string_pretty(update)?
    };
    println!("{json}");
    Ok(())
}

/// Handle the query command
///
/// # Errors
///
/// Returns `StarfilterError` if the selection is inverted or the commit
/// cannot be printed.
fn handle_query_command(
    filter: &mut RatingsFilter,
    store: &mut MemoryStore,
    selection: Option<Selection>,
    compact: bool,
    quiet: bool,
) -> Result<()> {
    if let Some(selection) = selection {
        if selection.start > selection.end {
            return Err(StarfilterError::InvalidInput(format!(
                "selection start {} is above its end {}",
                selection.start, selection.end
            )));
        }

        filter.handle_click(selection);
        filter.flush(store);
    }

    print_commit(store, filter.component_id(), compact, quiet)
}

/// Handle the browse command
///
/// # Errors
///
/// Returns `StarfilterError` if the terminal UI fails or the final commit
/// cannot be printed.
fn handle_browse_command(
    filter: &mut RatingsFilter,
    store: &mut MemoryStore,
    quiet: bool,
) -> Result<()> {
    let selection = RatingsRunner::new().run(filter, store)?;

    if !quiet {
        match selection {
            Some(selection) => eprintln!("{} {selection}", "Selected".green().bold()),
            None => eprintln!("{}", "No selection".yellow()),
        }
    }

    print_commit(store, filter.component_id(), false, quiet)
}

/// Parse arguments, build the filter and dispatch to the command handler
///
/// # Errors
///
/// Returns `StarfilterError` if configuration loading fails or the command
/// handler returns an error.
fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.load_config()?;
    let quiet = cli.quiet;

    let mut store = MemoryStore::new();
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    let result = match cli.get_command() {
        Commands::Browse => handle_browse_command(&mut filter, &mut store, quiet),
        Commands::Query { selection, compact } => {
            handle_query_command(&mut filter, &mut store, selection, compact, quiet)
        }
    };

    filter.teardown(&mut store);
    result
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
