//! Logger setup for the `pressroom` binary.
//!
//! All user-facing output goes through the `log` facade and is written to
//! stdout. `--logfile` tees the same lines to a file with ANSI escapes
//! stripped.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Writes to stdout and, when set, to a plain-text copy on disk.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Default filter for the given verbosity flags. `RUST_LOG` overrides it.
pub(crate) fn default_level(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Install the global logger.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => Some(File::create(path).map_err(|e| CliError::file(path, e))?),
        None => None,
    };

    let env = env_logger::Env::default().default_filter_or(default_level(quiet, verbose));
    env_logger::Builder::from_env(env)
        .format(move |buf, record| {
            if verbose {
                return writeln!(
                    buf,
                    "{} {:<5} {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
        .try_init()
        .map_err(|e| CliError::other(format!("Failed to initialize logging: {e}")))
}
