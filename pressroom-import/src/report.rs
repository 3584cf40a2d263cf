//! Audit trail of a reconciliation pass.
//!
//! Nothing in a pass is fatal once the inputs have parsed: duplicates,
//! missing identifiers, unmatched posts and slug conflicts are collected here
//! so the caller can review a dry run before persisting anything.

use pressroom_catalog::TableWarning;
use pressroom_core::Identifier;

/// Which precedence rule decided between duplicate candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurvivorRule {
    /// The survivor's link is on the canonical publication path.
    CanonicalPath,
    /// The survivor has a thumbnail and the discarded record does not.
    Thumbnail,
    /// Neither rule applied; the earlier record in input order won.
    InputOrder,
}

impl std::fmt::Display for SurvivorRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonicalPath => write!(f, "canonical path"),
            Self::Thumbnail => write!(f, "thumbnail"),
            Self::InputOrder => write!(f, "input order"),
        }
    }
}

/// A record discarded in favour of another with the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedDuplicate {
    pub identifier: Identifier,
    pub title: String,
    /// Link or guid of the discarded record.
    pub reference: String,
    /// Link or guid of the record that was kept.
    pub survivor_reference: String,
    pub reason: SurvivorRule,
}

/// A post whose link and guid hold no identifier. Excluded from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnidentifiablePost {
    pub title: String,
    pub reference: String,
}

/// A surviving post with no metadata row. It keeps its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedPost {
    pub identifier: Identifier,
    pub title: String,
}

/// One field whose value differs between input and output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub identifier: Identifier,
    pub field: &'static str,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// A slug already held by another post; the later holder was re-slugged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugConflict {
    pub identifier: Identifier,
    pub slug: String,
    pub held_by: Identifier,
}

/// A slug derived from a title during the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSlug {
    pub identifier: Identifier,
    pub title: String,
    pub slug: String,
}

/// A metadata row that matched no ingested post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedMetadata {
    pub identifier: Identifier,
    pub slug: String,
}

/// Everything a pass removed, changed, or could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub input_count: usize,
    pub output_count: usize,
    pub duplicates_removed: Vec<RemovedDuplicate>,
    pub unidentifiable: Vec<UnidentifiablePost>,
    pub unmatched: Vec<UnmatchedPost>,
    pub field_changes: Vec<FieldChange>,
    pub slug_conflicts: Vec<SlugConflict>,
    pub generated_slugs: Vec<GeneratedSlug>,
    pub orphaned_metadata: Vec<OrphanedMetadata>,
    /// Data-quality findings carried over from the metadata table.
    pub table_warnings: Vec<TableWarning>,
}

/// Counts from a reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    pub posts_in: usize,
    pub posts_out: usize,
    pub duplicates_removed: usize,
    pub unidentifiable: usize,
    pub unmatched: usize,
    pub fields_changed: usize,
    pub posts_changed: usize,
    pub slugs_generated: usize,
    pub slug_conflicts: usize,
    pub orphaned_metadata: usize,
    pub table_warnings: usize,
}

impl ReconciliationReport {
    /// True if persisting the output would alter the post data.
    pub fn has_changes(&self) -> bool {
        !self.duplicates_removed.is_empty()
            || !self.unidentifiable.is_empty()
            || !self.field_changes.is_empty()
    }

    /// True if anything needs a human to look at it.
    pub fn has_warnings(&self) -> bool {
        !self.unidentifiable.is_empty()
            || !self.unmatched.is_empty()
            || !self.slug_conflicts.is_empty()
            || !self.orphaned_metadata.is_empty()
            || !self.table_warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_changes() && !self.has_warnings()
    }

    /// Field changes recorded for one identifier.
    pub fn changes_for<'a>(
        &'a self,
        identifier: &'a Identifier,
    ) -> impl Iterator<Item = &'a FieldChange> + 'a {
        self.field_changes
            .iter()
            .filter(move |c| &c.identifier == identifier)
    }

    pub fn summary(&self) -> ReconcileStats {
        let mut changed: Vec<&Identifier> =
            self.field_changes.iter().map(|c| &c.identifier).collect();
        changed.dedup();

        ReconcileStats {
            posts_in: self.input_count,
            posts_out: self.output_count,
            duplicates_removed: self.duplicates_removed.len(),
            unidentifiable: self.unidentifiable.len(),
            unmatched: self.unmatched.len(),
            fields_changed: self.field_changes.len(),
            posts_changed: changed.len(),
            slugs_generated: self.generated_slugs.len(),
            slug_conflicts: self.slug_conflicts.len(),
            orphaned_metadata: self.orphaned_metadata.len(),
            table_warnings: self.table_warnings.len(),
        }
    }
}
