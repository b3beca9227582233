//! Authenticated caller extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jobboard_core::{JobBoardError, JobBoardResult, UserId};
use jobboard_security::{Claims, ClaimsExt};

/// Claims of the caller, placed in the request extensions by the auth
/// middleware once the bearer token has been validated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// The caller's user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.0.user_id
    }

    /// Fails with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> JobBoardResult<()> {
        self.0.require_admin()
    }

    /// Fails with `Forbidden` unless the caller is an applicant.
    pub fn require_applicant(&self) -> JobBoardResult<()> {
        self.0.require_applicant()
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError(JobBoardError::unauthorized("Missing or invalid bearer token")))
    }
}
