use thiserror::Error;

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A metadata row does not have the fixed column count. `row` is 1-based
    /// and counts the header as row 1.
    #[error("Malformed metadata row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The post collection is neither an array nor an object holding one.
    #[error("Invalid post collection: {0}")]
    InvalidCollection(String),
}

impl CatalogError {
    pub fn invalid_collection(msg: impl Into<String>) -> Self {
        Self::InvalidCollection(msg.into())
    }
}
