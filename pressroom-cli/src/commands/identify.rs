use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pressroom_core::Identifier;

/// Run the `identify` command: print the identifier found in each input.
pub(crate) fn run_identify(texts: &[String]) {
    for text in texts {
        match Identifier::extract(text) {
            Some(id) => log::info!("{}  {}", id.if_supports_color(Stdout, |t| t.green()), text),
            None => log::info!(
                "{}  {}",
                "(none)      ".if_supports_color(Stdout, |t| t.yellow()),
                text,
            ),
        }
    }
}
