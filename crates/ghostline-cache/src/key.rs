//! Cache key normalization

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters kept from the end of an excerpt
pub const MAX_KEY_CHARS: usize = 200;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Canonical form of a text excerpt used to address the suggestion cache
///
/// Newlines are removed, every run of whitespace becomes one space, trailing
/// whitespace is trimmed and only the last [`MAX_KEY_CHARS`] characters are
/// kept. Normalizing an already normalized string is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Normalize a raw excerpt into a key
    pub fn new(excerpt: &str) -> Self {
        Self(normalize(excerpt))
    }

    /// Borrow the normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(excerpt: &str) -> Self {
        Self::new(excerpt)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn normalize(excerpt: &str) -> String {
    let without_newlines = excerpt.replace('\n', "");
    let collapsed = WHITESPACE_RUN.replace_all(&without_newlines, " ");
    let trimmed = collapsed.trim_end();

    let char_count = trimmed.chars().count();
    if char_count <= MAX_KEY_CHARS {
        return trimmed.to_string();
    }

    let start = trimmed
        .char_indices()
        .nth(char_count - MAX_KEY_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    trimmed[start..].to_string()
}
