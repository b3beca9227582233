//! Account self-service and applicant administration.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, PaginationQuery, ValidatedJson},
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Router,
};
use jobboard_core::{Page, UserId};
use jobboard_service::{ChangePasswordRequest, MessageResponse, UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", put(update_me))
        .route("/me/password", put(change_password))
        .route("/admin/applicants", get(list_applicants))
        .route("/admin/applicant/:applicant_id", get(get_applicant))
        .route("/admin/user/:user_id", delete(delete_user))
}

/// Update the caller's name, address or headline.
#[utoipa::path(
    put,
    path = "/me",
    tag = "users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update account request: {}", user.id());

    let response = state.user_service.update_user(user.id(), request).await?;
    ok(response)
}

/// Rotate the caller's password.
#[utoipa::path(
    put,
    path = "/me/password",
    tag = "users",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Current password is wrong")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<MessageResponse> {
    debug!("Change password request: {}", user.id());

    state.user_service.change_password(user.id(), request).await?;
    ok(MessageResponse::new("Password changed"))
}

/// List applicants with their profiles (admin only).
#[utoipa::path(
    get,
    path = "/admin/applicants",
    tag = "admin",
    params(PaginationQuery),
    responses(
        (status = 200, description = "A page of applicants", body = Page<UserResponse>),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_applicants(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Page<UserResponse>> {
    debug!("List applicants request");

    user.require_admin()?;

    let response = state.user_service.get_all_applicants(pagination.into()).await?;
    ok(response)
}

/// Get one applicant with their profile (admin only).
#[utoipa::path(
    get,
    path = "/admin/applicant/{applicant_id}",
    tag = "admin",
    params(("applicant_id" = String, Path, description = "Applicant id")),
    responses(
        (status = 200, description = "The applicant", body = UserResponse),
        (status = 404, description = "No such applicant")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_applicant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(applicant_id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get applicant request: {}", applicant_id);

    user.require_admin()?;

    let id: UserId = parse_id("applicant", &applicant_id)?;
    let response = state.user_service.get_applicant_with_profile(id).await?;
    ok(response)
}

/// Delete a user and their applications (admin only).
#[utoipa::path(
    delete,
    path = "/admin/user/{user_id}",
    tag = "admin",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user"),
        (status = 409, description = "User still owns jobs")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", user_id);

    user.require_admin()?;

    let id: UserId = parse_id("user", &user_id)?;
    state.user_service.delete_user(id).await?;
    Ok(no_content())
}
