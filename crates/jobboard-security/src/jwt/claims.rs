//! JWT claims structure.

use chrono::{DateTime, Utc};
use jobboard_core::{UserId, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token.
///
/// Once validated these are the typed request context: identity and role are
/// read from here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// User ID.
    pub user_id: UserId,

    /// User's email at issuance.
    pub email: String,

    /// Account kind.
    pub role: UserRole,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    pub nbf: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,
}

impl Claims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new_access(
        user_id: UserId,
        email: String,
        role: UserRole,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            user_id,
            email,
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Checks if the token belongs to an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Checks if the token belongs to an applicant.
    #[must_use]
    pub const fn is_applicant(&self) -> bool {
        matches!(self.role, UserRole::Applicant)
    }

    /// Checks if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
