//! Authentication service.

use crate::dto::{AuthResponse, LoginRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use jobboard_core::{Interface, JobBoardError, JobBoardResult, ValidateExt};
use jobboard_security::{Claims, TokenProviderInterface};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Logs in a user and issues an access token.
    ///
    /// Unknown email and wrong password both surface as
    /// `InvalidCredentials`.
    async fn login(&self, request: LoginRequest) -> JobBoardResult<AuthResponse>;

    /// Validates an access token and returns its claims.
    async fn validate_token(&self, token: &str) -> JobBoardResult<Claims>;
}

/// Authentication service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    user_service: Arc<dyn UserService>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceComponent {
    /// Creates an auth service outside of a DI module.
    pub fn new(user_service: Arc<dyn UserService>, token_provider: Arc<dyn TokenProviderInterface>) -> Self {
        Self {
            user_service,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn login(&self, request: LoginRequest) -> JobBoardResult<AuthResponse> {
        debug!("Login attempt: {}", request.email);

        request.validate_request()?;

        let user = match self.user_service.validate_login(&request.email, &request.password).await {
            Ok(user) => user,
            Err(e) if e.is_dependency() => return Err(e),
            Err(_) => return Err(JobBoardError::InvalidCredentials),
        };

        let token = self.token_provider.issue(user.id, &user.email, user.role)?;

        info!("User logged in: {}", user.id);
        Ok(AuthResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserResponse::from(user),
        })
    }

    async fn validate_token(&self, token: &str) -> JobBoardResult<Claims> {
        self.token_provider.validate(token)
    }
}

impl std::fmt::Debug for AuthServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::dto::CreateUserRequest;
    use crate::r#impl::UserServiceComponent;
    use crate::testing::{fast_hasher, FakeStore, InstrumentedCache};
    use jobboard_config::SecurityConfig;
    use jobboard_core::UserRole;
    use jobboard_security::TokenProvider;

    fn security_config() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret-key-that-is-at-least-32-bytes".to_string(),
            ..SecurityConfig::default()
        }
    }

    async fn auth_with_user(email: &str, password: &str) -> AuthServiceComponent {
        let users = Arc::new(UserServiceComponent::new(
            FakeStore::new(),
            fast_hasher(),
            InstrumentedCache::new(),
            DEFAULT_TTL,
            true,
        ));
        users
            .create_user(CreateUserRequest {
                name: "Ann".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                address: String::new(),
                user_type: UserRole::Applicant,
                profile_headline: String::new(),
            })
            .await
            .unwrap();

        AuthServiceComponent::new(users, Arc::new(TokenProvider::new(Arc::new(security_config()))))
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user() {
        let auth = auth_with_user("ann@example.com", "correct horse").await;

        let response = auth.login(login("ann@example.com", "correct horse")).await.unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.email, "ann@example.com");

        let claims = auth.validate_token(&response.access_token).await.unwrap();
        assert_eq!(claims.user_id, response.user.id);
        assert_eq!(claims.role, UserRole::Applicant);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_the_same() {
        let auth = auth_with_user("ann@example.com", "correct horse").await;

        let wrong_password = auth.login(login("ann@example.com", "nope")).await.unwrap_err();
        let unknown_email = auth.login(login("bob@example.com", "correct horse")).await.unwrap_err();

        assert!(matches!(wrong_password, JobBoardError::InvalidCredentials));
        assert!(matches!(unknown_email, JobBoardError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_blank_login_is_validation_error() {
        let auth = auth_with_user("ann@example.com", "correct horse").await;
        let err = auth.login(login("", "")).await.unwrap_err();
        assert!(matches!(err, JobBoardError::Validation(_)));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let auth = auth_with_user("ann@example.com", "correct horse").await;
        let err = auth.validate_token("not-a-jwt").await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
