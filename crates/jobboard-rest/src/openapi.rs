//! OpenAPI documentation for the REST API.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse};
use crate::controllers::resume_controller::ResumeUploadForm;
use jobboard_core::{ErrorResponse, FieldError, JobId, Profile, ProfileId, UserId, UserRole};
use jobboard_service::{
    ApplyResponse, AuthResponse, ChangePasswordRequest, CreateJobRequest, CreateUserRequest, JobDetailResponse,
    JobResponse, LoginRequest, MessageResponse, UpdateJobRequest, UpdateUserRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Board API",
        version = "1.0.0",
        description = "Job postings, applications and applicant profiles",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::auth_controller::signup,
        crate::controllers::auth_controller::login,
        crate::controllers::user_controller::update_me,
        crate::controllers::user_controller::change_password,
        crate::controllers::user_controller::list_applicants,
        crate::controllers::user_controller::get_applicant,
        crate::controllers::user_controller::delete_user,
        crate::controllers::jobs_controller::list_jobs,
        crate::controllers::jobs_controller::apply_to_job,
        crate::controllers::jobs_controller::create_job,
        crate::controllers::jobs_controller::get_job,
        crate::controllers::jobs_controller::update_job,
        crate::controllers::jobs_controller::delete_job,
        crate::controllers::resume_controller::upload_resume,
        crate::controllers::resume_controller::get_resume,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            UserId,
            JobId,
            ProfileId,
            UserRole,
            Profile,
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            LoginRequest,
            AuthResponse,
            UpdateUserRequest,
            ChangePasswordRequest,
            UserResponse,
            MessageResponse,
            CreateJobRequest,
            UpdateJobRequest,
            JobResponse,
            JobDetailResponse,
            ApplyResponse,
            ResumeUploadForm,
            HealthResponse,
            ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "users", description = "Account self-service"),
        (name = "jobs", description = "Job listing and applications"),
        (name = "resume", description = "Resume upload and profile"),
        (name = "admin", description = "Job and applicant administration"),
        (name = "health", description = "Health check")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
