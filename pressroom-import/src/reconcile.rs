//! Post reconciliation by identifier.
//!
//! The feed harvester can produce several records for one post (re-ingestion,
//! republishing, export differences). All of them carry the same 12-hex
//! identifier in their link or guid. A pass:
//!
//! 1. groups records by identifier and keeps one survivor per group,
//! 2. overlays the curated metadata row onto each survivor,
//! 3. fills in missing slugs from titles, keeping slugs unique across the pass,
//! 4. sorts survivors by date.
//!
//! The inputs are never mutated; the pass returns a new collection and a
//! [`ReconciliationReport`] describing everything it did.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use pressroom_catalog::{MetadataTable, PostRecord, group_by_identifier};
use pressroom_core::{DEFAULT_MAX_WORDS, Identifier, SlugRegistry};
use serde::{Deserialize, Serialize};

use crate::overlay::{apply_permalink, diff_posts, overlay_metadata};
use crate::progress::ReconcileProgress;
use crate::report::{
    GeneratedSlug, OrphanedMetadata, ReconciliationReport, RemovedDuplicate, SlugConflict,
    SurvivorRule, UnidentifiablePost, UnmatchedPost,
};

// ── Canonical path predicate ────────────────────────────────────────────────

/// Decides whether a record sits on the authoritative publication path.
///
/// Used as the first survivor precedence rule between duplicates.
pub trait CanonicalPredicate: Send + Sync {
    fn is_canonical(&self, post: &PostRecord) -> bool;
}

impl<F> CanonicalPredicate for F
where
    F: Fn(&PostRecord) -> bool + Send + Sync,
{
    fn is_canonical(&self, post: &PostRecord) -> bool {
        self(post)
    }
}

/// Treats a record as canonical when its link (or guid, if it has no link)
/// contains a fixed path marker, e.g. the short-form `/p/<id>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMarker {
    marker: String,
}

impl PathMarker {
    /// Marker of the short-form publication URL: `https://medium.com/p/<id>`.
    pub const DEFAULT: &'static str = "/p/";

    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for PathMarker {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl CanonicalPredicate for PathMarker {
    fn is_canonical(&self, post: &PostRecord) -> bool {
        !self.marker.is_empty() && post.reference().contains(&self.marker)
    }
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Date field used to order the reconciled posts.
///
/// Each key falls back to the later ones when its date is missing or
/// unparseable: work date → publish date → feed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Work,
    Publish,
    Feed,
}

impl SortKey {
    pub fn date_of(&self, post: &PostRecord) -> Option<NaiveDateTime> {
        match self {
            Self::Work => post
                .work_date_parsed()
                .or_else(|| post.publish_date_parsed())
                .or_else(|| post.published_at_parsed()),
            Self::Publish => post
                .publish_date_parsed()
                .or_else(|| post.published_at_parsed()),
            Self::Feed => post.published_at_parsed(),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Publish => write!(f, "publish"),
            Self::Feed => write!(f, "feed"),
        }
    }
}

/// Error returned when a string cannot be parsed into a `SortKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKeyParseError(pub String);

impl std::fmt::Display for SortKeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected work, publish, or feed)",
            self.0
        )
    }
}

impl std::error::Error for SortKeyParseError {}

impl std::str::FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" | "workdate" | "work-date" => Ok(Self::Work),
            "publish" | "pubdate" | "publish-date" => Ok(Self::Publish),
            "feed" | "feed-date" | "published-at" => Ok(Self::Feed),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}

/// Options controlling a reconciliation pass.
pub struct ReconcileOptions {
    /// First survivor precedence rule.
    pub canonical: Box<dyn CanonicalPredicate>,
    /// Maximum title words used when deriving a slug.
    pub max_slug_words: usize,
    pub sort_key: SortKey,
    /// Oldest first instead of newest first.
    pub ascending: bool,
    /// When set, every survivor gets `permalink = prefix + slug`.
    pub permalink_prefix: Option<String>,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            canonical: Box::new(PathMarker::default()),
            max_slug_words: DEFAULT_MAX_WORDS,
            sort_key: SortKey::default(),
            ascending: false,
            permalink_prefix: None,
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canonical(mut self, predicate: impl CanonicalPredicate + 'static) -> Self {
        self.canonical = Box::new(predicate);
        self
    }

    pub fn max_slug_words(mut self, max_words: usize) -> Self {
        self.max_slug_words = max_words;
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn permalink_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.permalink_prefix = Some(prefix.into());
        self
    }
}

impl std::fmt::Debug for ReconcileOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileOptions")
            .field("max_slug_words", &self.max_slug_words)
            .field("sort_key", &self.sort_key)
            .field("ascending", &self.ascending)
            .field("permalink_prefix", &self.permalink_prefix)
            .finish_non_exhaustive()
    }
}

// ── Reconciler ──────────────────────────────────────────────────────────────

/// Output of a reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Deduplicated, metadata-overlaid, slug-complete posts in sort order.
    pub posts: Vec<PostRecord>,
    pub report: ReconciliationReport,
}

/// Runs reconciliation passes with a fixed set of options.
///
/// Holds no per-pass state: every call to [`Reconciler::reconcile`] creates
/// its own slug registry.
#[derive(Debug, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

/// A survivor being carried through the pass.
struct Candidate<'a> {
    identifier: Identifier,
    original: &'a PostRecord,
    post: PostRecord,
    /// The slug came from the metadata table.
    authoritative_slug: bool,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Run a pass over `posts` against `metadata`.
    pub fn reconcile(&self, posts: &[PostRecord], metadata: &MetadataTable) -> ReconcileResult {
        self.reconcile_with_progress(posts, metadata, None)
    }

    /// Run a pass, reporting progress to `progress` if given.
    pub fn reconcile_with_progress(
        &self,
        posts: &[PostRecord],
        metadata: &MetadataTable,
        progress: Option<&dyn ReconcileProgress>,
    ) -> ReconcileResult {
        let mut report = ReconciliationReport {
            input_count: posts.len(),
            table_warnings: metadata.warnings().to_vec(),
            ..ReconciliationReport::default()
        };

        // Group by identifier
        if let Some(p) = progress {
            p.on_phase("Grouping posts by identifier");
        }
        let grouped = group_by_identifier(posts);
        for post in grouped.unidentifiable() {
            report.unidentifiable.push(UnidentifiablePost {
                title: post.title.clone(),
                reference: post.reference().to_string(),
            });
        }

        // Pick survivors and overlay metadata
        if let Some(p) = progress {
            p.on_phase("Selecting survivors and applying metadata");
        }
        let total = grouped.len();
        let mut candidates = Vec::with_capacity(total);
        for (i, group) in grouped.groups().iter().enumerate() {
            let survivor = self.select_survivor(&group.identifier, &group.posts, &mut report);
            let mut post = survivor.clone();
            let mut authoritative_slug = false;

            match metadata.get_by_identifier(&group.identifier) {
                Some(record) => {
                    overlay_metadata(&mut post, record);
                    authoritative_slug = !record.slug.is_empty();
                }
                None => {
                    log::debug!(
                        "No metadata for {} ('{}')",
                        group.identifier,
                        survivor.title
                    );
                    report.unmatched.push(UnmatchedPost {
                        identifier: group.identifier.clone(),
                        title: survivor.title.clone(),
                    });
                }
            }

            candidates.push(Candidate {
                identifier: group.identifier.clone(),
                original: survivor,
                post,
                authoritative_slug,
            });

            if let Some(p) = progress {
                p.on_post(i + 1, total, &survivor.title);
            }
        }

        // Complete slugs
        if let Some(p) = progress {
            p.on_phase("Assigning slugs");
        }
        self.complete_slugs(&mut candidates, metadata, &mut report);

        if let Some(prefix) = &self.options.permalink_prefix {
            for c in &mut candidates {
                apply_permalink(&mut c.post, prefix);
            }
        }

        for c in &candidates {
            diff_posts(&mut report.field_changes, &c.identifier, c.original, &c.post);
        }

        report.orphaned_metadata = orphaned_metadata(metadata, &candidates);

        let mut out: Vec<PostRecord> = candidates.into_iter().map(|c| c.post).collect();
        sort_posts(&mut out, self.options.sort_key, self.options.ascending);
        report.output_count = out.len();

        if let Some(p) = progress {
            p.on_complete(&format!(
                "Reconciled {} posts into {} ({} duplicates removed)",
                report.input_count,
                report.output_count,
                report.duplicates_removed.len()
            ));
        }

        ReconcileResult { posts: out, report }
    }

    /// Pick one record per identifier. First rule that separates two
    /// candidates wins: canonical path, then thumbnail, then input order.
    fn select_survivor<'a>(
        &self,
        identifier: &Identifier,
        posts: &[&'a PostRecord],
        report: &mut ReconciliationReport,
    ) -> &'a PostRecord {
        let rank = |p: &PostRecord| (self.options.canonical.is_canonical(p), p.has_thumbnail());

        // max_by_key returns the last maximum; scan manually to keep the first
        let mut best = 0;
        for (i, &post) in posts.iter().enumerate().skip(1) {
            if rank(post) > rank(posts[best]) {
                best = i;
            }
        }
        let survivor = posts[best];
        let survivor_rank = rank(survivor);

        for (i, &post) in posts.iter().enumerate() {
            if i == best {
                continue;
            }
            let post_rank = rank(post);
            let reason = if survivor_rank.0 != post_rank.0 {
                SurvivorRule::CanonicalPath
            } else if survivor_rank.1 != post_rank.1 {
                SurvivorRule::Thumbnail
            } else {
                SurvivorRule::InputOrder
            };

            log::debug!(
                "Dropping duplicate of {} ({}): kept {} by {}",
                identifier,
                post.reference(),
                survivor.reference(),
                reason
            );
            report.duplicates_removed.push(RemovedDuplicate {
                identifier: identifier.clone(),
                title: post.title.clone(),
                reference: post.reference().to_string(),
                survivor_reference: survivor.reference().to_string(),
                reason,
            });
        }

        survivor
    }

    /// Make every survivor's slug present and unique.
    ///
    /// Curated slugs are claimed first, in metadata table row order, so the
    /// same row keeps a contested slug no matter how the posts are ordered.
    /// A record that loses a curated slug falls back to the slug it arrived
    /// with. Remaining slugs are then claimed in input order, and any record
    /// whose slug is already taken loses it. Records left without a slug get
    /// one derived from their title, again in input order.
    fn complete_slugs(
        &self,
        candidates: &mut [Candidate<'_>],
        metadata: &MetadataTable,
        report: &mut ReconciliationReport,
    ) {
        let mut registry = SlugRegistry::with_max_words(self.options.max_slug_words);
        let mut holders: HashMap<String, Identifier> = HashMap::new();

        let curated: Vec<usize> = {
            let by_identifier: HashMap<&Identifier, usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.authoritative_slug)
                .map(|(i, c)| (&c.identifier, i))
                .collect();
            metadata
                .records()
                .iter()
                .filter_map(|r| by_identifier.get(&r.identifier).copied())
                .collect()
        };

        for i in curated {
            let c = &mut candidates[i];
            let Some(slug) = c.post.slug().map(str::to_string) else {
                continue;
            };
            if claim_slug(&mut registry, &mut holders, c, &slug, report) {
                continue;
            }
            c.post.slug = c
                .original
                .slug()
                .filter(|s| *s != slug)
                .map(str::to_string);
            c.authoritative_slug = false;
        }

        for c in candidates.iter_mut().filter(|c| !c.authoritative_slug) {
            let Some(slug) = c.post.slug().map(str::to_string) else {
                continue;
            };
            if !claim_slug(&mut registry, &mut holders, c, &slug, report) {
                c.post.slug = None;
            }
        }

        for c in candidates.iter_mut().filter(|c| c.post.slug().is_none()) {
            let slug = registry.issue(&c.post.title);
            log::debug!("Generated slug '{}' for {}", slug, c.identifier);
            report.generated_slugs.push(GeneratedSlug {
                identifier: c.identifier.clone(),
                title: c.post.title.clone(),
                slug: slug.clone(),
            });
            c.post.slug = Some(slug);
        }
    }
}

/// Claim `slug` for `candidate`, recording a conflict if another record
/// already holds it.
fn claim_slug(
    registry: &mut SlugRegistry,
    holders: &mut HashMap<String, Identifier>,
    candidate: &Candidate<'_>,
    slug: &str,
    report: &mut ReconciliationReport,
) -> bool {
    if registry.claim(slug.to_string()) {
        holders.insert(slug.to_string(), candidate.identifier.clone());
        return true;
    }

    let held_by = holders
        .get(slug)
        .cloned()
        .unwrap_or_else(|| candidate.identifier.clone());
    log::warn!(
        "Slug '{}' of {} is already used by {}, falling back",
        slug,
        candidate.identifier,
        held_by
    );
    report.slug_conflicts.push(SlugConflict {
        identifier: candidate.identifier.clone(),
        slug: slug.to_string(),
        held_by,
    });
    false
}

/// Run a pass with the given options.
pub fn reconcile(
    posts: &[PostRecord],
    metadata: &MetadataTable,
    options: ReconcileOptions,
) -> ReconcileResult {
    Reconciler::new(options).reconcile(posts, metadata)
}

/// Metadata rows whose identifier matched no survivor.
fn orphaned_metadata(metadata: &MetadataTable, candidates: &[Candidate<'_>]) -> Vec<OrphanedMetadata> {
    let seen: HashSet<&Identifier> = candidates.iter().map(|c| &c.identifier).collect();
    metadata
        .records()
        .iter()
        .filter(|r| !seen.contains(&r.identifier))
        .map(|r| OrphanedMetadata {
            identifier: r.identifier.clone(),
            slug: r.slug.clone(),
        })
        .collect()
}

/// Stable sort by date, newest first unless `ascending`. Undated posts go last.
pub fn sort_posts(posts: &mut Vec<PostRecord>, key: SortKey, ascending: bool) {
    let mut keyed: Vec<(Option<NaiveDateTime>, PostRecord)> = posts
        .drain(..)
        .map(|p| (key.date_of(&p), p))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) if ascending => a.cmp(b),
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    posts.extend(keyed.into_iter().map(|(_, p)| p));
}
