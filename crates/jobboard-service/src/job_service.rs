//! Job service trait definition.

use crate::dto::{ApplyResponse, CreateJobRequest, JobDetailResponse, JobResponse, UpdateJobRequest};
use async_trait::async_trait;
use jobboard_core::{Interface, JobBoardResult, JobFilter, JobId, Page, PageRequest, UserId};

/// Job service trait.
#[async_trait]
pub trait JobService: Interface + Send + Sync {
    /// Lists jobs matching `filter`, newest first.
    async fn list_jobs(&self, filter: JobFilter, page: PageRequest) -> JobBoardResult<Page<JobResponse>>;

    /// Gets a job with its poster and applicants.
    async fn get_job_with_applicants(&self, id: JobId) -> JobBoardResult<JobDetailResponse>;

    /// Posts a new job.
    async fn create_job(&self, posted_by: UserId, request: CreateJobRequest) -> JobBoardResult<JobResponse>;

    /// Applies `user_id` to `job_id` exactly once.
    async fn apply_to_job(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<ApplyResponse>;

    /// Updates the provided fields of a job.
    async fn update_job(&self, id: JobId, request: UpdateJobRequest) -> JobBoardResult<JobResponse>;

    /// Deletes a job and its applications.
    async fn delete_job(&self, id: JobId) -> JobBoardResult<()>;
}
