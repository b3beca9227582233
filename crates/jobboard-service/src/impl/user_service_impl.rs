//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use jobboard_core::{
    normalize_email, require_non_blank, JobBoardError, JobBoardResult, Page, PageRequest, User, UserId, UserRole,
    ValidateExt,
};
use jobboard_repository::UserRepository;
use jobboard_security::PasswordHasherInterface;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
    #[shaku(default = true)]
    allow_admin_signup: bool,
}

impl UserServiceComponent {
    /// Creates a user service outside of a DI module.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
        cache_ttl: Duration,
        allow_admin_signup: bool,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
            cache_ttl,
            allow_admin_signup,
        }
    }

    /// Component parameters for registering the service in a shaku module.
    #[must_use]
    pub fn parameters(cache_ttl: Duration, allow_admin_signup: bool) -> UserServiceComponentParameters {
        UserServiceComponentParameters {
            cache_ttl,
            allow_admin_signup,
        }
    }

    async fn find_user(&self, id: UserId) -> JobBoardResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("User", id))
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_user(&self, request: CreateUserRequest) -> JobBoardResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        require_non_blank("name", &request.name)?;
        require_non_blank("email", &request.email)?;
        require_non_blank("password", &request.password)?;

        let request = CreateUserRequest {
            email: normalize_email(&request.email),
            name: request.name.trim().to_string(),
            ..request
        };
        request.validate_request()?;

        if request.user_type == UserRole::Admin && !self.allow_admin_signup {
            return Err(JobBoardError::forbidden("Admin signup is disabled"));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let mut user = User::new(request.name, request.email, request.user_type, password_hash);
        user.address = request.address;
        user.profile_headline = request.profile_headline;

        let saved = self.user_repository.create(&user).await?;

        self.cache.evict_pattern(&cache_keys::applicant_list_pattern()).await;

        info!("User created: {} ({})", saved.id, saved.role);
        Ok(UserResponse::from(saved))
    }

    async fn validate_login(&self, email: &str, password: &str) -> JobBoardResult<User> {
        let email = normalize_email(email);
        debug!("Validating login for: {}", email);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            // Same cost as a real check, so response time does not reveal the email.
            let _ = self.password_hasher.hash(password);
            warn!("Login rejected: unknown email");
            return Err(JobBoardError::not_found("User", email));
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            warn!("Login rejected: wrong password for user {}", user.id);
            return Err(JobBoardError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn get_all_applicants(&self, page: PageRequest) -> JobBoardResult<Page<UserResponse>> {
        let page = page.normalized();
        debug!("Listing applicants, page: {}, size: {}", page.page, page.page_size);

        let cache_key = cache_keys::applicant_list(page);
        if let Some(cached) = self.cache.get_or_miss::<Page<UserResponse>>(&cache_key).await {
            debug!("Cache hit for applicants page {}", page.page);
            return Ok(cached);
        }

        let response = self
            .user_repository
            .find_applicants(page)
            .await?
            .map(UserResponse::from);

        self.cache.set_quietly(&cache_key, &response, self.cache_ttl).await;

        Ok(response)
    }

    async fn get_applicant_with_profile(&self, id: UserId) -> JobBoardResult<UserResponse> {
        debug!("Getting applicant: {}", id);

        let user = self
            .user_repository
            .find_with_profile(id)
            .await?
            .filter(User::is_applicant)
            .ok_or_else(|| JobBoardError::not_found("Applicant", id))?;

        Ok(UserResponse::from(user))
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> JobBoardResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;
        if let Some(name) = &request.name {
            require_non_blank("name", name)?;
        }

        let mut user = self.find_user(id).await?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(address) = request.address {
            user.address = address;
        }
        if let Some(headline) = request.profile_headline {
            user.profile_headline = headline;
        }
        user.touch();

        let updated = self.user_repository.update(&user).await?;

        // Job details embed applicant data.
        self.cache.evict_pattern(&cache_keys::applicant_list_pattern()).await;
        self.cache.evict_pattern(&cache_keys::jobs_namespace_pattern()).await;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn change_password(&self, id: UserId, request: ChangePasswordRequest) -> JobBoardResult<()> {
        debug!("Changing password for user: {}", id);

        request.validate_request()?;

        let user = self.find_user(id).await?;

        if !self.password_hasher.verify(&request.current_password, &user.password_hash)? {
            warn!("Password change rejected for user {}", id);
            return Err(JobBoardError::InvalidCredentials);
        }

        let new_hash = self.password_hasher.hash(&request.new_password)?;
        self.user_repository.update_password(id, &new_hash).await?;

        info!("Password changed for user: {}", id);
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> JobBoardResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(JobBoardError::not_found("User", id));
        }

        self.cache.evict_pattern(&cache_keys::applicant_list_pattern()).await;
        self.cache.evict_pattern(&cache_keys::jobs_namespace_pattern()).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent")
            .field("cache_ttl", &self.cache_ttl)
            .field("allow_admin_signup", &self.allow_admin_signup)
            .finish_non_exhaustive()
    }
}
