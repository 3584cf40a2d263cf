//! Post identifiers embedded in feed URLs.
//!
//! Feed links end with a 12-character lowercase hex fragment that names the
//! post across re-ingestion, republishing, and export differences:
//! ```text
//! https://medium.com/@someone/robot-rabbits-8aacc89aecc9?source=rss
//!                                          ^^^^^^^^^^^^
//! ```

use serde::{Deserialize, Serialize};

/// Number of hex characters in an identifier.
pub const IDENTIFIER_LEN: usize = 12;

/// A 12-character lowercase hexadecimal post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Extract the identifier from a URL or GUID-like string.
    ///
    /// A candidate is a run of exactly 12 `[a-f0-9]` characters followed by
    /// either `?` or the end of the string. Longer hex runs never match. When
    /// several candidates exist the last one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use pressroom_core::Identifier;
    ///
    /// let id = Identifier::extract("https://medium.com/@a/foo-bar-8aacc89aecc9?source=rss");
    /// assert_eq!(id.unwrap().as_str(), "8aacc89aecc9");
    ///
    /// assert!(Identifier::extract("no-hash-here").is_none());
    /// ```
    pub fn extract(text: &str) -> Option<Identifier> {
        let bytes = text.as_bytes();
        let mut found = None;
        let mut i = 0;

        while i < bytes.len() {
            if !is_hex(bytes[i]) {
                i += 1;
                continue;
            }

            let start = i;
            while i < bytes.len() && is_hex(bytes[i]) {
                i += 1;
            }

            let terminated = i == bytes.len() || bytes[i] == b'?';
            if i - start == IDENTIFIER_LEN && terminated {
                found = Some(start);
            }
        }

        found.map(|start| Identifier(text[start..start + IDENTIFIER_LEN].to_string()))
    }

    /// Accept only a bare, well-formed identifier.
    pub fn parse(text: &str) -> Option<Identifier> {
        if text.len() == IDENTIFIER_LEN && text.bytes().all(is_hex) {
            Some(Identifier(text.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// Error returned when a string is not a bare 12-character hex identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierParseError(pub String);

impl std::fmt::Display for IdentifierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not a 12-character hex identifier: '{}'", self.0)
    }
}

impl std::error::Error for IdentifierParseError {}

impl TryFrom<String> for Identifier {
    type Error = IdentifierParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Identifier::parse(&s).ok_or(IdentifierParseError(s))
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s).ok_or_else(|| IdentifierParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/identifier_tests.rs"]
mod tests;
