//! Title → slug derivation with per-run uniqueness.
//!
//! Slugs are built from the words of a title before its first colon:
//! ```text
//! "Robot Rabbits: Part Two"  ->  robot-rabbits
//! "The Very Long Title Of A Cartoon About Ducks"  ->  the-very-long-title-of-a
//! ```
//! The generator prefers the shortest free prefix of at most `max_words`
//! words, lengthens the prefix on collision, and finally numbers the
//! `max_words` prefix (`-2`, `-3`, ...).

use std::collections::HashSet;

/// Default number of title words used for a slug.
pub const DEFAULT_MAX_WORDS: usize = 6;

/// Base slug for titles with no usable words.
pub const UNTITLED: &str = "untitled";

/// Generate a slug for `title` that is not contained in `used`.
///
/// Pure: the caller must record the returned slug before generating the next
/// one if slugs are to stay unique.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use pressroom_core::slug::generate_slug;
///
/// let mut used = HashSet::new();
/// let first = generate_slug("Robot Rabbits: Part Two", &used, 6);
/// assert_eq!(first, "robot-rabbits");
///
/// used.insert(first);
/// assert_eq!(generate_slug("Robot Rabbits", &used, 6), "robot-rabbits-2");
/// ```
pub fn generate_slug(title: &str, used: &HashSet<String>, max_words: usize) -> String {
    let words = slug_words(title);
    if words.is_empty() {
        if !used.contains(UNTITLED) {
            return UNTITLED.to_string();
        }
        return numbered(UNTITLED, used);
    }

    let n = words.len().min(max_words.max(1));
    for len in n..=words.len() {
        let candidate = words[..len].join("-");
        if !used.contains(&candidate) {
            return candidate;
        }
    }

    numbered(&words[..n].join("-"), used)
}

/// First free `{base}-{i}` for i = 2, 3, ...
fn numbered(base: &str, used: &HashSet<String>) -> String {
    let mut i: u64 = 2;
    loop {
        let candidate = format!("{base}-{i}");
        if !used.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// Split a title into sanitized slug words.
///
/// Only the text before the first `:` is used. Everything outside
/// `[a-z0-9]`, whitespace, and `-` is dropped after lowercasing. Hyphens
/// survive only between alphanumerics inside a word.
fn slug_words(title: &str) -> Vec<String> {
    let head = match title.find(':') {
        Some(pos) => &title[..pos],
        None => title,
    };

    let sanitized: String = head
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    sanitized.split_whitespace().filter_map(clean_word).collect()
}

fn clean_word(word: &str) -> Option<String> {
    let mut out = String::with_capacity(word.len());
    for part in word.split('-').filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(part);
    }
    (!out.is_empty()).then_some(out)
}

/// The set of slugs issued during one reconciliation pass.
///
/// Owned by a single pass and threaded through it by `&mut`; independent
/// passes each create their own registry.
#[derive(Debug, Clone)]
pub struct SlugRegistry {
    issued: HashSet<String>,
    max_words: usize,
}

impl Default for SlugRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::with_max_words(DEFAULT_MAX_WORDS)
    }

    pub fn with_max_words(max_words: usize) -> Self {
        Self {
            issued: HashSet::new(),
            max_words: max_words.max(1),
        }
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.issued.contains(slug)
    }

    /// Record an externally assigned slug.
    ///
    /// Returns `false` if the slug was already taken.
    pub fn claim(&mut self, slug: impl Into<String>) -> bool {
        self.issued.insert(slug.into())
    }

    /// Generate a free slug for `title` and record it.
    pub fn issue(&mut self, title: &str) -> String {
        let slug = generate_slug(title, &self.issued, self.max_words);
        self.issued.insert(slug.clone());
        slug
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.issued.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "tests/slug_tests.rs"]
mod tests;
