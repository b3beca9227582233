//! User service trait definition.

use crate::dto::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use jobboard_core::{Interface, JobBoardResult, Page, PageRequest, User, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Signs up a new user.
    async fn create_user(&self, request: CreateUserRequest) -> JobBoardResult<UserResponse>;

    /// Checks a password against the stored credential.
    ///
    /// An unknown email is `NotFound` and a wrong password is
    /// `InvalidCredentials`; callers facing clients must collapse both.
    async fn validate_login(&self, email: &str, password: &str) -> JobBoardResult<User>;

    /// Lists applicants with their profiles.
    async fn get_all_applicants(&self, page: PageRequest) -> JobBoardResult<Page<UserResponse>>;

    /// Gets one applicant with their profile.
    async fn get_applicant_with_profile(&self, id: UserId) -> JobBoardResult<UserResponse>;

    /// Updates name, address and headline.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> JobBoardResult<UserResponse>;

    /// Rotates a user's password.
    async fn change_password(&self, id: UserId, request: ChangePasswordRequest) -> JobBoardResult<()>;

    /// Deletes a user and their applications.
    async fn delete_user(&self, id: UserId) -> JobBoardResult<()>;
}
