use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pressroom_core::{DEFAULT_MAX_WORDS, SlugRegistry};

use crate::settings::{Settings, resolve};

/// Run the `slug` command: issue slugs for `titles` from one registry.
pub(crate) fn run_slug(titles: &[String], max_words: Option<usize>, settings: &Settings) {
    let max_words = resolve(
        max_words,
        settings.reconcile.max_slug_words,
        DEFAULT_MAX_WORDS,
    );
    log::debug!("Max slug words: {} ({})", max_words.value, max_words.source);

    let mut registry = SlugRegistry::with_max_words(max_words.value);
    for title in titles {
        let slug = registry.issue(title);
        log::info!(
            "{}  {}",
            slug.if_supports_color(Stdout, |t| t.green()),
            title.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
