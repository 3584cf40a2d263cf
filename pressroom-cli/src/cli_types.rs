//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pressroom_import::SortKey;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Reconcile harvested blog posts against a curated metadata table", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the `reconcile` command. Unset options fall back to the
/// settings file, then to built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct ReconcileArgs {
    /// Metadata table (CSV)
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Harvested posts (JSON)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// Where to write the reconciled posts (default: overwrite --posts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the report without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Date used to order the output (work, publish, feed)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Oldest first instead of newest first
    #[arg(long)]
    pub ascending: bool,

    /// Maximum title words used when deriving a slug
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Substring that marks a link as the canonical publication path
    #[arg(long)]
    pub canonical_marker: Option<String>,

    /// Set every post's permalink to this prefix followed by its slug
    #[arg(long)]
    pub permalink_prefix: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Deduplicate posts, apply metadata, and fill in missing slugs
    Reconcile {
        #[command(flatten)]
        args: ReconcileArgs,
    },

    /// Validate a metadata table and list its warnings
    Check {
        /// Metadata table (CSV)
        #[arg(short, long)]
        metadata: Option<PathBuf>,
    },

    /// Preview the slugs that would be derived from titles, in order
    Slug {
        /// Titles to slugify
        #[arg(required = true)]
        titles: Vec<String>,

        /// Maximum title words used when deriving a slug
        #[arg(long)]
        max_words: Option<usize>,
    },

    /// Print the identifier found in each URL or string
    Identify {
        /// URLs or strings to scan
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,
}
