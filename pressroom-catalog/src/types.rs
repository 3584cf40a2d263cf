//! Data model for the post catalog.
//!
//! `MetadataRecord` is one row of the human-curated table; `PostRecord` is one
//! ingested feed entry. Posts keep a fixed core schema plus a passthrough bag
//! so unknown feed fields survive a reconciliation pass untouched.

use chrono::NaiveDateTime;
use pressroom_core::Identifier;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::parse_date;

// ── Metadata ────────────────────────────────────────────────────────────────

/// One row of the authoritative metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Canonical slug. May be blank for rows that have not been curated yet.
    pub slug: String,
    pub identifier: Identifier,
    pub title: String,
    pub image_slug: String,
    pub work_date: String,
    pub pub_date: String,
    pub category: String,
    pub cluster: String,
    pub featured: bool,
    pub notes: String,
}

impl MetadataRecord {
    pub fn work_date_parsed(&self) -> Option<NaiveDateTime> {
        parse_date(&self.work_date)
    }

    pub fn pub_date_parsed(&self) -> Option<NaiveDateTime> {
        parse_date(&self.pub_date)
    }
}

/// Interpret a featured cell: case-insensitive `"yes"` is true, anything else false.
pub fn parse_featured(cell: &str) -> bool {
    cell.trim().eq_ignore_ascii_case("yes")
}

// ── Posts ───────────────────────────────────────────────────────────────────

/// One ingested content entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Feed date as reported by the feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// RSS-style feed date, kept under its own key.
    #[serde(default, rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    /// Date the work was made, overlaid from metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_date: Option<String>,
    /// Curated publication date, overlaid from metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Every other field of the feed entry (content snippet, author, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PostRecord {
    /// Create a post with a title and link, all other fields empty.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// The identifier embedded in `link`, falling back to `guid`.
    pub fn identifier(&self) -> Option<Identifier> {
        self.link
            .as_deref()
            .and_then(Identifier::extract)
            .or_else(|| self.guid.as_deref().and_then(Identifier::extract))
    }

    /// The source reference used in reports: `link`, else `guid`, else empty.
    pub fn reference(&self) -> &str {
        self.link
            .as_deref()
            .or(self.guid.as_deref())
            .unwrap_or("")
    }

    /// The slug, if present and non-blank.
    pub fn slug(&self) -> Option<&str> {
        non_blank(self.slug.as_deref())
    }

    pub fn has_thumbnail(&self) -> bool {
        non_blank(self.thumbnail.as_deref()).is_some()
    }

    pub fn work_date_parsed(&self) -> Option<NaiveDateTime> {
        self.work_date.as_deref().and_then(parse_date)
    }

    pub fn publish_date_parsed(&self) -> Option<NaiveDateTime> {
        self.publish_date.as_deref().and_then(parse_date)
    }

    /// The feed date: `publishedAt`, else `pubDate`.
    pub fn feed_date(&self) -> Option<&str> {
        non_blank(self.published_at.as_deref()).or(non_blank(self.pub_date.as_deref()))
    }

    pub fn published_at_parsed(&self) -> Option<NaiveDateTime> {
        self.feed_date().and_then(parse_date)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Accept `true`/`false`, `"yes"`/`"no"` or `null` for a flag field.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => None,
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Text(s)) => {
            let s = s.trim();
            Some(s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true"))
        }
    })
}
