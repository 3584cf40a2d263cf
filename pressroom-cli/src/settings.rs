//! Settings file and per-value resolution.
//!
//! The settings file lives at `~/.config/pressroom/settings.toml`. Every value
//! is resolved through the same chain:
//!
//! 1. Command-line flag (if given)
//! 2. Value in `settings.toml`
//! 3. Built-in default

use std::path::{Path, PathBuf};

use pressroom_core::DEFAULT_MAX_WORDS;
use pressroom_import::{PathMarker, ReconcileOptions, SortKey};
use serde::{Deserialize, Serialize};

use crate::cli_types::ReconcileArgs;

/// Canonical path to the settings file: `~/.config/pressroom/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pressroom").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub paths: PathSettings,
    pub reconcile: ReconcileSettings,
}

/// Default input locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PathSettings {
    pub metadata: Option<PathBuf>,
    pub posts: Option<PathBuf>,
}

/// Defaults for the `reconcile` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ReconcileSettings {
    pub canonical_marker: Option<String>,
    pub max_slug_words: Option<usize>,
    pub sort: Option<SortKey>,
    pub ascending: Option<bool>,
    pub permalink_prefix: Option<String>,
}

impl Settings {
    /// Load the settings file from its standard location.
    pub(crate) fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults. An unreadable or unparsable file
    /// is reported and also yields the defaults.
    pub(crate) fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {}",
                    path.display(),
                    e.message()
                );
                Self::default()
            }
        }
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingSource {
    Flag,
    SettingsFile,
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved value and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Setting<T> {
    pub value: T,
    pub source: SettingSource,
}

pub(crate) fn resolve<T>(flag: Option<T>, file: Option<T>, default: T) -> Setting<T> {
    match (flag, file) {
        (Some(value), _) => Setting {
            value,
            source: SettingSource::Flag,
        },
        (None, Some(value)) => Setting {
            value,
            source: SettingSource::SettingsFile,
        },
        (None, None) => Setting {
            value: default,
            source: SettingSource::Default,
        },
    }
}

/// Effective inputs and options of one `reconcile` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedReconcile {
    pub metadata: Setting<Option<PathBuf>>,
    pub posts: Setting<Option<PathBuf>>,
    pub canonical_marker: Setting<String>,
    pub max_slug_words: Setting<usize>,
    pub sort: Setting<SortKey>,
    pub ascending: Setting<bool>,
    pub permalink_prefix: Setting<Option<String>>,
}

impl ResolvedReconcile {
    pub(crate) fn resolve(args: &ReconcileArgs, settings: &Settings) -> Self {
        let file = &settings.reconcile;
        Self {
            metadata: resolve(
                args.metadata.clone().map(Some),
                settings.paths.metadata.clone().map(Some),
                None,
            ),
            posts: resolve(
                args.posts.clone().map(Some),
                settings.paths.posts.clone().map(Some),
                None,
            ),
            canonical_marker: resolve(
                args.canonical_marker.clone(),
                file.canonical_marker.clone(),
                PathMarker::DEFAULT.to_string(),
            ),
            max_slug_words: resolve(args.max_words, file.max_slug_words, DEFAULT_MAX_WORDS),
            sort: resolve(args.sort, file.sort, SortKey::default()),
            ascending: resolve(args.ascending.then_some(true), file.ascending, false),
            permalink_prefix: resolve(
                args.permalink_prefix.clone().map(Some),
                file.permalink_prefix.clone().map(Some),
                None,
            ),
        }
    }

    pub(crate) fn to_options(&self) -> ReconcileOptions {
        let mut options = ReconcileOptions::new()
            .canonical(PathMarker::new(self.canonical_marker.value.clone()))
            .max_slug_words(self.max_slug_words.value)
            .sort_key(self.sort.value)
            .ascending(self.ascending.value);
        if let Some(prefix) = &self.permalink_prefix.value {
            options = options.permalink_prefix(prefix.clone());
        }
        options
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
