use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::ReconcileArgs;
use crate::settings::{ResolvedReconcile, Setting, Settings, settings_path};

fn show_value(name: &str, value: Option<String>, source: impl std::fmt::Display) {
    let source_str = format!("({})", source);
    match value {
        Some(v) => {
            log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

fn show<T: ToString>(name: &str, setting: &Setting<T>) {
    show_value(name, Some(setting.value.to_string()), setting.source);
}

fn show_path(name: &str, setting: &Setting<Option<std::path::PathBuf>>) {
    show_value(
        name,
        setting.value.as_ref().map(|p| p.display().to_string()),
        setting.source,
    );
}

/// Show effective settings and their sources.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings_path();

    log::info!(
        "{}",
        "pressroom configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let resolved = ResolvedReconcile::resolve(&ReconcileArgs::default(), settings);

    log::info!("{}", "[paths]".if_supports_color(Stdout, |t| t.bold()));
    show_path("metadata", &resolved.metadata);
    show_path("posts", &resolved.posts);
    log::info!("");
    log::info!("{}", "[reconcile]".if_supports_color(Stdout, |t| t.bold()));
    show("canonical_marker", &resolved.canonical_marker);
    show("max_slug_words", &resolved.max_slug_words);
    show("sort", &resolved.sort);
    show("ascending", &resolved.ascending);
    show_value(
        "permalink_prefix",
        resolved.permalink_prefix.value.clone(),
        resolved.permalink_prefix.source,
    );
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
