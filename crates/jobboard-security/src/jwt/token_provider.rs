//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jobboard_config::SecurityConfig;
use jobboard_core::{Interface, JobBoardError, JobBoardResult, UserId, UserRole};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// An issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed JWT.
    pub access_token: String,
    /// Seconds until expiry.
    pub expires_in: u64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// Issues and validates signed tokens carrying user identity and role.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Issues an access token for a user.
    fn issue(&self, user_id: UserId, email: &str, role: UserRole) -> JobBoardResult<IssuedToken>;

    /// Validates a token and returns its claims.
    fn validate(&self, token: &str) -> JobBoardResult<Claims>;
}

/// HS256 token provider.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Component parameters for registering the provider in a shaku module.
    #[must_use]
    pub fn parameters(config: Arc<SecurityConfig>) -> TokenProviderParameters {
        let Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        } = Self::new(config);

        TokenProviderParameters {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    fn map_error(err: &jsonwebtoken::errors::Error) -> JobBoardError {
        match err.kind() {
            ErrorKind::ExpiredSignature => JobBoardError::TokenExpired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                JobBoardError::InvalidToken("Invalid token signature".to_string())
            }
            ErrorKind::InvalidIssuer => JobBoardError::InvalidToken("Invalid token issuer".to_string()),
            ErrorKind::InvalidAudience => JobBoardError::InvalidToken("Invalid token audience".to_string()),
            _ => JobBoardError::InvalidToken(err.to_string()),
        }
    }
}

impl TokenProviderInterface for TokenProvider {
    fn issue(&self, user_id: UserId, email: &str, role: UserRole) -> JobBoardResult<IssuedToken> {
        let lifetime = self.config.jwt_access_expiration_secs;
        let expires_at = Utc::now() + Duration::seconds(i64::try_from(lifetime).unwrap_or(i64::MAX / 1000));

        let claims = Claims::new_access(
            user_id,
            email.to_string(),
            role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JobBoardError::Internal(format!("Failed to generate access token: {}", e)))?;

        debug!("Generated access token for user {}", user_id);
        Ok(IssuedToken {
            access_token,
            expires_in: lifetime,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate(&self, token: &str) -> JobBoardResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            Self::map_error(&e)
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
