//! Job listing, applications and job administration.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, JobListQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use jobboard_core::{JobId, Page};
use jobboard_service::{ApplyResponse, CreateJobRequest, JobDetailResponse, JobResponse, UpdateJobRequest};
use tracing::debug;

/// Creates the jobs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/:job_id/apply", post(apply_to_job))
        .route("/admin/job", post(create_job))
        .route("/admin/job/:job_id", get(get_job).put(update_job).delete(delete_job))
}

/// List jobs, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(JobListQuery),
    responses(
        (status = 200, description = "A page of jobs", body = Page<JobResponse>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Page<JobResponse>> {
    debug!("List jobs request from {}", user.id());

    let (filter, page) = query.into_parts();
    let response = state.job_service.list_jobs(filter, page).await?;
    ok(response)
}

/// Apply to a job as the calling applicant.
#[utoipa::path(
    post,
    path = "/jobs/{job_id}/apply",
    tag = "jobs",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Application recorded", body = ApplyResponse),
        (status = 403, description = "Not an applicant"),
        (status = 404, description = "No such job"),
        (status = 409, description = "Already applied")
    ),
    security(("bearer_auth" = []))
)]
pub async fn apply_to_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
) -> ApiResult<ApplyResponse> {
    debug!("Apply request: {} -> {}", user.id(), job_id);

    user.require_applicant()?;

    let job_id: JobId = parse_id("job", &job_id)?;
    let response = state.job_service.apply_to_job(job_id, user.id()).await?;
    ok(response)
}

/// Post a job (admin only).
#[utoipa::path(
    post,
    path = "/admin/job",
    tag = "admin",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Missing title or description"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponse>>), AppError> {
    debug!("Create job request: {}", request.title);

    user.require_admin()?;

    let response = state.job_service.create_job(user.id(), request).await?;
    Ok(created(response))
}

/// Get a job with its applicants (admin only).
#[utoipa::path(
    get,
    path = "/admin/job/{job_id}",
    tag = "admin",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job and its applicants", body = JobDetailResponse),
        (status = 404, description = "No such job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
) -> ApiResult<JobDetailResponse> {
    debug!("Get job request: {}", job_id);

    user.require_admin()?;

    let job_id: JobId = parse_id("job", &job_id)?;
    let response = state.job_service.get_job_with_applicants(job_id).await?;
    ok(response)
}

/// Update a job (admin only).
#[utoipa::path(
    put,
    path = "/admin/job/{job_id}",
    tag = "admin",
    params(("job_id" = String, Path, description = "Job id")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 404, description = "No such job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<JobResponse> {
    debug!("Update job request: {}", job_id);

    user.require_admin()?;

    let job_id: JobId = parse_id("job", &job_id)?;
    let response = state.job_service.update_job(job_id, request).await?;
    ok(response)
}

/// Delete a job and its applications (admin only).
#[utoipa::path(
    delete,
    path = "/admin/job/{job_id}",
    tag = "admin",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "No such job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete job request: {}", job_id);

    user.require_admin()?;

    let job_id: JobId = parse_id("job", &job_id)?;
    state.job_service.delete_job(job_id).await?;
    Ok(no_content())
}
