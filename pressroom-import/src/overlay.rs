//! Field overlay from the metadata table and change detection.
//!
//! The metadata table is authoritative: matched values replace whatever the
//! feed record carried. A blank value and an absent value are treated as the
//! same thing so that overlaying a blank cell onto a missing field is not a
//! change, and a second pass over reconciled output records nothing.

use pressroom_catalog::{MetadataRecord, PostRecord};
use pressroom_core::Identifier;

use crate::report::FieldChange;

/// Overlay the authoritative fields of `record` onto `post`.
///
/// Blank slug and date cells leave the post's own values in place; category
/// and cluster are copied as-is, so a blank cell clears them.
pub fn overlay_metadata(post: &mut PostRecord, record: &MetadataRecord) {
    if !record.slug.is_empty() {
        set_text(&mut post.slug, &record.slug);
    }
    set_text(&mut post.category, &record.category);
    set_text(&mut post.cluster, &record.cluster);
    if post.featured.unwrap_or(false) != record.featured {
        post.featured = Some(record.featured);
    }
    if !record.work_date.is_empty() {
        set_text(&mut post.work_date, &record.work_date);
    }
    if !record.pub_date.is_empty() {
        set_text(&mut post.publish_date, &record.pub_date);
    }
}

/// Derive the permalink of a post from its slug.
pub fn apply_permalink(post: &mut PostRecord, prefix: &str) {
    if let Some(slug) = post.slug() {
        let permalink = format!("{prefix}{slug}");
        set_text(&mut post.permalink, &permalink);
    }
}

/// Assign `value` unless the slot already holds it (blank == absent).
pub(crate) fn set_text(slot: &mut Option<String>, value: &str) {
    if slot.as_deref().unwrap_or("") != value {
        *slot = Some(value.to_string());
    }
}

/// Compare one optional field and record a change if the values differ.
///
/// Returns `true` if a change was recorded.
pub fn check_field(
    changes: &mut Vec<FieldChange>,
    identifier: &Identifier,
    field: &'static str,
    before: Option<&str>,
    after: Option<&str>,
) -> bool {
    let before = before.filter(|v| !v.is_empty());
    let after = after.filter(|v| !v.is_empty());

    if before == after {
        return false;
    }

    changes.push(FieldChange {
        identifier: identifier.clone(),
        field,
        before: before.map(str::to_string),
        after: after.map(str::to_string),
    });
    true
}

/// Record every overlaid field that differs between `before` and `after`.
///
/// Returns the number of changes found.
pub fn diff_posts(
    changes: &mut Vec<FieldChange>,
    identifier: &Identifier,
    before: &PostRecord,
    after: &PostRecord,
) -> u32 {
    let mut count = 0u32;

    let text_fields: [(&'static str, &Option<String>, &Option<String>); 6] = [
        ("slug", &before.slug, &after.slug),
        ("category", &before.category, &after.category),
        ("cluster", &before.cluster, &after.cluster),
        ("workDate", &before.work_date, &after.work_date),
        ("publishDate", &before.publish_date, &after.publish_date),
        ("permalink", &before.permalink, &after.permalink),
    ];

    for (field, old, new) in text_fields {
        if check_field(changes, identifier, field, old.as_deref(), new.as_deref()) {
            count += 1;
        }
    }

    let old_flag = before.featured.unwrap_or(false);
    let new_flag = after.featured.unwrap_or(false);
    if old_flag != new_flag {
        changes.push(FieldChange {
            identifier: identifier.clone(),
            field: "featured",
            before: Some(old_flag.to_string()),
            after: Some(new_flag.to_string()),
        });
        count += 1;
    }

    count
}
