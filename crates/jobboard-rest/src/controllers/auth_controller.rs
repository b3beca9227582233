//! Signup and login.

use crate::{
    extractors::ValidatedJson,
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use jobboard_service::{AuthResponse, CreateUserRequest, LoginRequest, UserResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Create an account.
///
/// The email is normalized before it is checked, so the body is validated
/// by the service rather than at extraction.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Signup request for: {}", request.email);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    debug!("Login request for: {}", request.email);

    let response = state.auth_service.login(request).await?;
    ok(response)
}
