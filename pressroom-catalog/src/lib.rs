//! Post catalog data model, metadata table parsing, and post collections.
//!
//! This crate defines the records exchanged with the surrounding tool layer
//! without doing any file I/O itself: callers hand it text and receive typed
//! collections back.

pub mod dates;
pub mod error;
pub mod metadata;
pub mod posts;
pub mod types;

pub use dates::parse_date;
pub use error::CatalogError;
pub use metadata::{METADATA_COLUMNS, METADATA_HEADER, MetadataTable, TableWarning};
pub use posts::{IdentifierGroups, PostCollection, PostGroup, group_by_identifier};
pub use types::*;
