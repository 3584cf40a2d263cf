use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pressroom_catalog::PostCollection;
use pressroom_import::{ReconcileProgress, Reconciler, ReconciliationReport};

use super::truncate_str;
use crate::cli_types::ReconcileArgs;
use crate::error::CliError;
use crate::files::{load_posts, load_table, save_posts};
use crate::settings::{ResolvedReconcile, Settings};

/// Progress bar over identifier groups, hidden in quiet mode.
struct CliReconcileProgress {
    pb: ProgressBar,
}

impl CliReconcileProgress {
    fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            pb
        };
        Self { pb }
    }
}

impl ReconcileProgress for CliReconcileProgress {
    fn on_post(&self, current: usize, total: usize, title: &str) {
        self.pb.set_length(total as u64);
        self.pb.set_position(current as u64);
        self.pb.set_message(truncate_str(title, 40));
    }

    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::debug!("{}", message);
    }
}

/// Run the `reconcile` command.
pub(crate) fn run_reconcile(
    args: ReconcileArgs,
    settings: &Settings,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved = ResolvedReconcile::resolve(&args, settings);

    let metadata_path = resolved.metadata.value.clone().ok_or_else(|| {
        CliError::config("no metadata table given (use --metadata or set paths.metadata)")
    })?;
    let posts_path = resolved.posts.value.clone().ok_or_else(|| {
        CliError::config("no post collection given (use --posts or set paths.posts)")
    })?;
    let output_path: PathBuf = args.output.clone().unwrap_or_else(|| posts_path.clone());

    log::debug!(
        "Canonical marker: '{}' ({})",
        resolved.canonical_marker.value,
        resolved.canonical_marker.source
    );
    log::debug!(
        "Max slug words: {} ({})",
        resolved.max_slug_words.value,
        resolved.max_slug_words.source
    );
    log::debug!(
        "Sort: {} {} ({})",
        resolved.sort.value,
        if resolved.ascending.value { "ascending" } else { "descending" },
        resolved.sort.source
    );

    let table = load_table(&metadata_path)?;
    let posts = load_posts(&posts_path)?;

    log::info!(
        "{}",
        "Reconciling posts...".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Metadata: {} ({} rows)",
        metadata_path.display().if_supports_color(Stdout, |t| t.cyan()),
        table.len(),
    );
    log::info!(
        "  Posts:    {} ({} records)",
        posts_path.display().if_supports_color(Stdout, |t| t.cyan()),
        posts.len(),
    );

    let reconciler = Reconciler::new(resolved.to_options());
    let progress = CliReconcileProgress::new(quiet);
    let result = reconciler.reconcile_with_progress(posts.posts(), &table, Some(&progress));

    print_report(&result.report);

    log::info!("");
    if args.dry_run {
        log::info!(
            "{}",
            "Dry run: no changes written.".if_supports_color(Stdout, |t| t.yellow()),
        );
        return Ok(());
    }

    let output = PostCollection::from(result.posts);
    save_posts(&output_path, &output)?;
    log::info!(
        "{} Wrote {} posts to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.len(),
        output_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print a reconciliation report section by section, then the totals.
pub(crate) fn print_report(report: &ReconciliationReport) {
    if !report.duplicates_removed.is_empty() {
        log::info!(
            "\n  {}",
            "Duplicates removed".if_supports_color(Stdout, |t| t.bold()),
        );
        for d in &report.duplicates_removed {
            log::info!(
                "    {} \"{}\" {} (kept {}, by {})",
                d.identifier.if_supports_color(Stdout, |t| t.dimmed()),
                truncate_str(&d.title, 50),
                d.reference,
                d.survivor_reference.if_supports_color(Stdout, |t| t.green()),
                d.reason,
            );
        }
    }

    if !report.unidentifiable.is_empty() {
        log::info!(
            "\n  {}",
            "Excluded (no identifier)".if_supports_color(Stdout, |t| t.bold()),
        );
        for p in &report.unidentifiable {
            let reference = if p.reference.is_empty() {
                "no link or guid"
            } else {
                p.reference.as_str()
            };
            log::info!(
                "    \"{}\" {}",
                truncate_str(&p.title, 50),
                reference.if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }

    if !report.slug_conflicts.is_empty() {
        log::info!(
            "\n  {}",
            "Slug conflicts".if_supports_color(Stdout, |t| t.bold()),
        );
        for c in &report.slug_conflicts {
            log::info!(
                "    {} '{}' already held by {}",
                c.identifier.if_supports_color(Stdout, |t| t.dimmed()),
                c.slug.if_supports_color(Stdout, |t| t.yellow()),
                c.held_by,
            );
        }
    }

    if !report.generated_slugs.is_empty() {
        log::info!(
            "\n  {}",
            "Generated slugs".if_supports_color(Stdout, |t| t.bold()),
        );
        for g in &report.generated_slugs {
            log::info!(
                "    {} \"{}\" -> {}",
                g.identifier.if_supports_color(Stdout, |t| t.dimmed()),
                truncate_str(&g.title, 50),
                g.slug.if_supports_color(Stdout, |t| t.green()),
            );
        }
    }

    if !report.field_changes.is_empty() {
        log::info!(
            "\n  {}",
            "Field changes".if_supports_color(Stdout, |t| t.bold()),
        );
        for c in &report.field_changes {
            log::info!(
                "    {} {}: {} -> {}",
                c.identifier.if_supports_color(Stdout, |t| t.dimmed()),
                c.field.if_supports_color(Stdout, |t| t.cyan()),
                c.before.as_deref().unwrap_or("(none)"),
                c.after.as_deref().unwrap_or("(none)"),
            );
        }
    }

    if !report.unmatched.is_empty() {
        log::debug!("Posts without metadata:");
        for u in &report.unmatched {
            log::debug!("  {} \"{}\"", u.identifier, u.title);
        }
    }

    if !report.orphaned_metadata.is_empty() {
        log::info!(
            "\n  {}",
            "Metadata rows with no post".if_supports_color(Stdout, |t| t.bold()),
        );
        for o in &report.orphaned_metadata {
            log::info!(
                "    {} {}",
                o.identifier.if_supports_color(Stdout, |t| t.dimmed()),
                o.slug,
            );
        }
    }

    if !report.table_warnings.is_empty() {
        log::info!(
            "\n  {}",
            "Metadata table warnings".if_supports_color(Stdout, |t| t.bold()),
        );
        for w in &report.table_warnings {
            log::info!("    {}", w.if_supports_color(Stdout, |t| t.yellow()));
        }
    }

    let stats = report.summary();
    log::info!("");
    log::info!(
        "{}",
        "Reconciliation summary".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Posts in:           {:>6}", stats.posts_in);
    log::info!("  Posts out:          {:>6}", stats.posts_out);
    log::info!("  Duplicates removed: {:>6}", stats.duplicates_removed);
    log::info!("  Excluded:           {:>6}", stats.unidentifiable);
    log::info!("  Without metadata:   {:>6}", stats.unmatched);
    log::info!("  Posts changed:      {:>6}", stats.posts_changed);
    log::info!("  Fields changed:     {:>6}", stats.fields_changed);
    log::info!("  Slugs generated:    {:>6}", stats.slugs_generated);
    if stats.slug_conflicts > 0 {
        log::info!("  Slug conflicts:     {:>6}", stats.slug_conflicts);
    }
    if stats.orphaned_metadata > 0 {
        log::info!("  Orphaned rows:      {:>6}", stats.orphaned_metadata);
    }
    if stats.table_warnings > 0 {
        log::info!("  Table warnings:     {:>6}", stats.table_warnings);
    }
    if report.is_clean() {
        log::info!(
            "  {}",
            "Nothing to change.".if_supports_color(Stdout, |t| t.green()),
        );
    }
}
