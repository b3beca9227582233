//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use jobboard_security::TokenProviderInterface;
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthMiddlewareState {
    pub fn new(token_provider: Arc<dyn TokenProviderInterface>) -> Self {
        Self { token_provider }
    }
}

/// Validates `Authorization: Bearer <jwt>` and stores the claims in the
/// request extensions.
///
/// Requests without a valid token pass through untouched; handlers that need
/// a caller ask for [`crate::extractors::AuthenticatedUser`].
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    if let Some(token) = token {
        match state.token_provider.validate(token) {
            Ok(claims) => {
                debug!("Authenticated user: {} ({})", claims.user_id, claims.role);
                request.extensions_mut().insert(claims);
            }
            Err(e) => debug!("Token validation failed: {}", e),
        }
    }

    next.run(request).await
}
