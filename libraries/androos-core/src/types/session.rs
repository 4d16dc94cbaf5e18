//! Audio session identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned identifier of a live audio mixer session
///
/// The id is owned by the platform audio pipeline. Effect engines borrow it
/// to attach to the session's output; nothing in the player owns or
/// invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioSessionId(i32);

impl AudioSessionId {
    /// Sentinel the platform reports before a session has been generated
    pub const UNSET: Self = Self(0);

    /// Wrap a raw platform session id
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw platform value
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Whether this id refers to an actual session
    pub const fn is_set(&self) -> bool {
        self.0 != Self::UNSET.0
    }
}

impl From<i32> for AudioSessionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AudioSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
