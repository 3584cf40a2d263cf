//! Ingested post collections and identifier grouping.
//!
//! A collection is loaded from the feed dump (a JSON array, or an object with
//! a `posts`/`items` array) and may contain several records for one
//! identifier. Grouping keeps first-seen order so later passes are
//! deterministic.

use std::collections::HashMap;

use pressroom_core::Identifier;
use serde_json::Value;

use crate::error::CatalogError;
use crate::types::PostRecord;

/// An ordered set of ingested posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCollection {
    posts: Vec<PostRecord>,
}

impl PostCollection {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self { posts }
    }

    /// Parse a collection from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        let list = match value {
            Value::Array(list) => Value::Array(list),
            Value::Object(mut map) => match map.remove("posts").or_else(|| map.remove("items")) {
                Some(list @ Value::Array(_)) => list,
                Some(_) => {
                    return Err(CatalogError::invalid_collection(
                        "'posts' is not an array",
                    ));
                }
                None => {
                    return Err(CatalogError::invalid_collection(
                        "object has no 'posts' or 'items' array",
                    ));
                }
            },
            _ => {
                return Err(CatalogError::invalid_collection(
                    "expected an array of posts",
                ));
            }
        };
        let posts: Vec<PostRecord> = serde_json::from_value(list)?;
        Ok(Self { posts })
    }

    /// Serialize as a pretty-printed JSON array.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostRecord> {
        self.posts.iter()
    }

    pub fn group_by_identifier(&self) -> IdentifierGroups<'_> {
        group_by_identifier(&self.posts)
    }
}

impl From<Vec<PostRecord>> for PostCollection {
    fn from(posts: Vec<PostRecord>) -> Self {
        Self::new(posts)
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a PostRecord;
    type IntoIter = std::slice::Iter<'a, PostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// All posts that share one identifier, in input order.
#[derive(Debug, Clone)]
pub struct PostGroup<'a> {
    pub identifier: Identifier,
    pub posts: Vec<&'a PostRecord>,
}

impl PostGroup<'_> {
    pub fn is_duplicated(&self) -> bool {
        self.posts.len() > 1
    }
}

/// Posts grouped by identifier, plus the ones with no identifier at all.
#[derive(Debug, Clone, Default)]
pub struct IdentifierGroups<'a> {
    groups: Vec<PostGroup<'a>>,
    index: HashMap<Identifier, usize>,
    unidentifiable: Vec<&'a PostRecord>,
}

impl<'a> IdentifierGroups<'a> {
    /// Groups in order of each identifier's first appearance.
    pub fn groups(&self) -> &[PostGroup<'a>] {
        &self.groups
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&PostGroup<'a>> {
        self.index.get(identifier).map(|&pos| &self.groups[pos])
    }

    pub fn unidentifiable(&self) -> &[&'a PostRecord] {
        &self.unidentifiable
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records beyond the first in every group.
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.posts.len() - 1).sum()
    }
}

/// Group posts by the identifier in their `link`, falling back to `guid`.
///
/// Posts with no identifier are collected in
/// [`IdentifierGroups::unidentifiable`] and logged, never dropped.
pub fn group_by_identifier(posts: &[PostRecord]) -> IdentifierGroups<'_> {
    let mut grouped = IdentifierGroups::default();

    for post in posts {
        let Some(identifier) = post.identifier() else {
            log::warn!(
                "No identifier in post '{}' ({})",
                post.title,
                if post.reference().is_empty() {
                    "no link or guid"
                } else {
                    post.reference()
                }
            );
            grouped.unidentifiable.push(post);
            continue;
        };

        match grouped.index.get(&identifier) {
            Some(&pos) => grouped.groups[pos].posts.push(post),
            None => {
                grouped.index.insert(identifier.clone(), grouped.groups.len());
                grouped.groups.push(PostGroup {
                    identifier,
                    posts: vec![post],
                });
            }
        }
    }

    grouped
}
