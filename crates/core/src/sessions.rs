//! Session Tiers

use serde::{Deserialize, Serialize};

/// Tier of a session-priced enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionTier {
    /// One session.
    Single,

    /// More than one session bought together.
    Package,
}

impl SessionTier {
    /// Tier for a course's session count. A missing count is one session.
    #[must_use]
    pub fn from_count(session_count: Option<u32>) -> Self {
        match session_count {
            Some(count) if count > 1 => Self::Package,
            _ => Self::Single,
        }
    }

    /// Stored tag of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Package => "package",
        }
    }

    /// Parse a stored tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "single" => Some(Self::Single),
            "package" => Some(Self::Package),
            _ => None,
        }
    }
}
