//! Identity and naming primitives for the pressroom pipeline.
//!
//! This crate has no I/O: it extracts post identifiers from feed URLs and
//! derives unique slugs from titles. Catalog parsing and reconciliation live
//! in `pressroom-catalog` and `pressroom-import`.

pub mod identifier;
pub mod slug;

pub use identifier::{IDENTIFIER_LEN, Identifier, IdentifierParseError};
pub use slug::{DEFAULT_MAX_WORDS, SlugRegistry, UNTITLED, generate_slug};
