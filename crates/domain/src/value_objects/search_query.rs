//! Search query value object

use serde::Serialize;
use std::fmt;

/// A geocoding query that is guaranteed to be trimmed and non-empty
///
/// Holding a `SearchQuery` is proof that a request may be issued; raw input
/// that is empty or whitespace-only never becomes one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Parse raw user input, returning `None` for empty or whitespace-only text
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this query matches the given raw input once trimmed
    #[must_use]
    pub fn matches_input(&self, input: &str) -> bool {
        self.0 == input.trim()
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
