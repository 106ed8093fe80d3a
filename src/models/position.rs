//! Football positions.

use serde::{Deserialize, Serialize};

use super::PositionId;

/// Longest allowed short code, e.g. "QB" or "OLB".
pub const MAX_SHORT_NAME_LEN: usize = 5;

/// A named football position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub id: Option<PositionId>,

    #[serde(default)]
    pub slug: Option<String>,

    /// Full name, e.g. "Quarterback"
    pub name: String,

    /// Short code, e.g. "QB"
    pub short_name: String,
}

impl Position {
    /// Create a position, truncating the short code to its maximum length.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        let short_name: String = short_name.into().chars().take(MAX_SHORT_NAME_LEN).collect();
        Self {
            id: None,
            slug: None,
            name: name.into(),
            short_name,
        }
    }
}
