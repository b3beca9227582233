//! User entity.

use super::{Profile, UserRole};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account on the board, either an admin or an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Login email, unique across all users (stored lower-cased).
    pub email: String,

    /// Postal address.
    pub address: String,

    /// Account kind.
    pub role: UserRole,

    /// Argon2 PHC string (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Short headline shown next to the name.
    pub profile_headline: String,

    /// Parsed resume, loaded only by queries that ask for it.
    pub profile: Option<Profile>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly hashed credential.
    #[must_use]
    pub fn new(name: String, email: String, role: UserRole, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            address: String::new(),
            role,
            password_hash,
            profile_headline: String::new(),
            profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Checks if the user is an applicant.
    #[must_use]
    pub const fn is_applicant(&self) -> bool {
        matches!(self.role, UserRole::Applicant)
    }

    /// Marks the entity as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Normalizes an email for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
