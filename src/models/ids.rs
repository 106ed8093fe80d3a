//! Record identifiers and URL-safe slugs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric record identifier, assigned by the repository on first commit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Create a new RecordId from a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Type alias for sport IDs
pub type SportId = RecordId;

/// Type alias for conference IDs
pub type ConferenceId = RecordId;

/// Type alias for season IDs
pub type SeasonId = RecordId;

/// Type alias for school IDs
pub type SchoolId = RecordId;

/// Type alias for player IDs
pub type PlayerId = RecordId;

/// Type alias for position IDs
pub type PositionId = RecordId;

/// Type alias for game IDs
pub type GameId = RecordId;

/// Normalize a human-readable label into a URL-safe slug.
///
/// Non-ASCII characters and punctuation are dropped, the result is
/// lowercased, and runs of whitespace or hyphens collapse into a single `-`.
/// Underscores are kept.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
    }

    slug
}

/// Returns true if a slug is absent or blank and should be generated.
pub fn slug_missing(slug: &Option<String>) -> bool {
    slug.as_deref().map_or(true, |s| s.trim().is_empty())
}
