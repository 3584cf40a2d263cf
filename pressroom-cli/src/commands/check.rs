use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::files::load_table;
use crate::settings::{Settings, resolve};

/// Run the `check` command: parse a metadata table and list its warnings.
pub(crate) fn run_check(metadata: Option<PathBuf>, settings: &Settings) -> Result<(), CliError> {
    let path = resolve(
        metadata.map(Some),
        settings.paths.metadata.clone().map(Some),
        None,
    )
    .value
    .ok_or_else(|| {
        CliError::config("no metadata table given (use --metadata or set paths.metadata)")
    })?;

    let table = load_table(&path)?;

    log::info!(
        "{}",
        "Metadata table".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  File:     {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Records:  {:>6}", table.len());

    let with_slug = table.records().iter().filter(|r| !r.slug.is_empty()).count();
    let featured = table.records().iter().filter(|r| r.featured).count();
    log::info!("  Slugged:  {:>6}", with_slug);
    log::info!("  Featured: {:>6}", featured);

    let undated: Vec<_> = table
        .records()
        .iter()
        .filter(|r| !r.work_date.is_empty() && r.work_date_parsed().is_none())
        .collect();
    for record in &undated {
        log::warn!(
            "Unrecognized work date '{}' for {}",
            record.work_date,
            record.identifier
        );
    }

    log::info!("");
    if table.warnings().is_empty() && undated.is_empty() {
        log::info!(
            "{} No problems found",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "{} {} warning(s)",
            "\u{26a0}".if_supports_color(Stdout, |t| t.yellow()),
            table.warnings().len() + undated.len(),
        );
    }
    Ok(())
}
