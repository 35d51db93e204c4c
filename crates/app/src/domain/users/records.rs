//! User Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Identifier of a buyer: an account id, or the email of a guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier used for a guest checkout.
    #[must_use]
    pub fn for_guest_email(email: &str) -> Self {
        Self(normalize_email(email))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Guest User Record
#[derive(Debug, Clone, PartialEq)]
pub struct GuestUserRecord {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Guest details captured at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuestUser {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
