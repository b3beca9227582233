//! User-related DTOs.

use chrono::{DateTime, Utc};
use jobboard_core::{Profile, User, UserId, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Signup request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 128, message = "Name cannot exceed 128 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(max = 256, message = "Password cannot exceed 256 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 512))]
    pub address: String,

    /// Defaults to `APPLICANT`.
    #[serde(default)]
    pub user_type: UserRole,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub profile_headline: String,
}

/// Request to update the caller's own account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 512))]
    pub address: Option<String>,

    #[validate(length(max = 256))]
    pub profile_headline: Option<String>,
}

/// Request to change password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

/// User response DTO. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub user_type: UserRole,
    pub profile_headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            user_type: user.role,
            profile_headline: user.profile_headline,
            profile: user.profile,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
