pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "estuary")]
#[command(about = "Aggregate, deduplicate and search syndicated news feeds", long_about = None)]
pub struct Cli {
    /// Config file path (default: ~/.config/estuary/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all sources now, bypassing the cache TTL
    Refresh,
    /// Show the aggregated item list, newest first
    List {
        /// Maximum number of items to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Translate titles into the configured target language
        #[arg(short, long)]
        translate: bool,
    },
    /// Search cached items (all terms must match; Cyrillic and Latin
    /// spellings are equivalent)
    Search {
        /// Query terms
        query: String,
    },
    /// Show one item in full by its ID
    Show {
        /// Item ID as printed by `search`
        id: String,
    },
    /// List configured sources
    Sources,
}
