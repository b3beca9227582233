//! Resume upload and retrieval.

use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    routing::{get, post},
    Router,
};
use jobboard_core::{JobBoardError, Profile};
use tracing::debug;
use utoipa::ToSchema;

/// Multipart field carrying the document.
pub const RESUME_FIELD: &str = "resume";

/// Creates the resume router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploadResume", post(upload_resume))
        .route("/resume", get(get_resume))
}

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ResumeUploadForm {
    /// PDF or DOCX document.
    #[schema(value_type = String, format = Binary)]
    resume: Vec<u8>,
}

/// Parse a resume and store it as the caller's profile (applicants only).
#[utoipa::path(
    post,
    path = "/uploadResume",
    tag = "resume",
    request_body(content = ResumeUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored profile", body = Profile),
        (status = 400, description = "Missing or empty file"),
        (status = 403, description = "Not an applicant"),
        (status = 502, description = "Resume parser failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_resume(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> ApiResult<Profile> {
    debug!("Resume upload from {}", user.id());

    user.require_applicant()?;

    let (file_name, document) = read_resume(&mut multipart).await?;
    let profile = state
        .resume_service
        .process_resume(user.id(), file_name, document)
        .await?;
    ok(profile)
}

/// Get the caller's stored profile (applicants only).
#[utoipa::path(
    get,
    path = "/resume",
    tag = "resume",
    responses(
        (status = 200, description = "Stored profile", body = Profile),
        (status = 404, description = "No resume processed yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_resume(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<Profile> {
    user.require_applicant()?;

    let profile = state.resume_service.get_resume_data(user.id()).await?;
    ok(profile)
}

async fn read_resume(multipart: &mut Multipart) -> Result<(Option<String>, Bytes), AppError> {
    let invalid = |e: axum::extract::multipart::MultipartError| {
        AppError(JobBoardError::validation(format!("Invalid multipart body: {}", e.body_text())))
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() == Some(RESUME_FIELD) {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid)?;
            return Ok((file_name, bytes));
        }
    }

    Err(AppError(JobBoardError::validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    ))))
}
