//! Reconcile ingested posts against the curated metadata table.
//!
//! This crate owns the pass that deduplicates posts by identifier, overlays
//! metadata, completes slugs, and reports everything it changed. It performs
//! no I/O; the CLI loads inputs and persists the result.

pub mod overlay;
pub mod progress;
pub mod reconcile;
pub mod report;

pub use overlay::{apply_permalink, check_field, diff_posts, overlay_metadata};
pub use progress::{LogProgress, ReconcileProgress, SilentProgress};
pub use reconcile::{
    CanonicalPredicate, PathMarker, ReconcileOptions, ReconcileResult, Reconciler, SortKey,
    SortKeyParseError, reconcile, sort_posts,
};
pub use report::{
    FieldChange, GeneratedSlug, OrphanedMetadata, ReconcileStats, ReconciliationReport,
    RemovedDuplicate, SlugConflict, SurvivorRule, UnidentifiablePost, UnmatchedPost,
};
