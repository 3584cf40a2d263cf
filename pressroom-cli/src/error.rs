use std::path::{Path, PathBuf};

use pressroom_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A file could not be read or written
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A metadata table or post collection could not be parsed
    #[error("{}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn catalog(path: &Path, source: CatalogError) -> Self {
        Self::Catalog {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
