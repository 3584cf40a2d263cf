//! pressroom CLI
//!
//! Command-line interface for reconciling harvested blog posts against the
//! curated metadata table.

mod cli_types;
mod commands;
mod error;
mod files;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::check::run_check;
use commands::config::{run_config_path, run_config_show};
use commands::identify::run_identify;
use commands::reconcile::run_reconcile;
use commands::slug::run_slug;
use settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let settings = Settings::load();

    let result = match cli.command {
        Commands::Reconcile { args } => run_reconcile(args, &settings, cli.quiet),
        Commands::Check { metadata } => run_check(metadata, &settings),
        Commands::Slug { titles, max_words } => {
            run_slug(&titles, max_words, &settings);
            Ok(())
        }
        Commands::Identify { texts } => {
            run_identify(&texts);
            Ok(())
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => run_config_show(&settings),
                ConfigAction::Path => run_config_path(),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
