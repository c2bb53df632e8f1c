//! Subject identifier type for door-access events
//!
//! Synthetic subjects are drawn from a fixed numbered pool (`user_1` ..
//! `user_N`). Identifiers read back from an event table may be any string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used for synthetic subject identifiers
pub const USER_ID_PREFIX: &str = "user_";

/// Identifier of the subject (badge holder) attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create an identifier from arbitrary text
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create the synthetic identifier for a 1-based pool slot
    pub fn from_pool_index(index: u32) -> Self {
        Self(format!("{}{}", USER_ID_PREFIX, index))
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is blank (an empty cell in an event table)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pool slot of a synthetic identifier, if it is one
    pub fn pool_index(&self) -> Option<u32> {
        self.0.strip_prefix(USER_ID_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
