//! Job-related DTOs.

use super::UserResponse;
use chrono::{DateTime, Utc};
use jobboard_core::{Job, JobId, JobWithApplicants, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to post a job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobRequest {
    #[validate(length(max = 256, message = "Title cannot exceed 256 characters"))]
    pub title: String,

    #[validate(length(max = 20000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub company_name: String,

    /// Defaults to the time of posting.
    #[serde(default)]
    pub posted_on: Option<DateTime<Utc>>,
}

/// Partial job update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJobRequest {
    #[validate(length(max = 256, message = "Title cannot exceed 256 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 20000))]
    pub description: Option<String>,

    #[validate(length(max = 256))]
    pub company_name: Option<String>,
}

/// Job response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            company_name: job.company_name,
            posted_on: job.posted_on,
            total_applications: job.total_applications,
            posted_by_id: job.posted_by,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// A job with the admin who posted it and everyone who applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobDetailResponse {
    pub job: JobResponse,
    pub posted_by: Option<UserResponse>,
    pub applicants: Vec<UserResponse>,
}

impl From<JobWithApplicants> for JobDetailResponse {
    fn from(value: JobWithApplicants) -> Self {
        Self {
            job: JobResponse::from(value.job),
            posted_by: value.posted_by.map(UserResponse::from),
            applicants: value.applicants.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Result of a successful application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub job_id: JobId,
    pub total_applications: i32,
}
