//! Repository trait definitions.

use async_trait::async_trait;
use jobboard_core::{
    Interface, Job, JobBoardResult, JobFilter, JobId, JobWithApplicants, Page, PageRequest, Profile, User, UserId,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> JobBoardResult<Option<User>>;

    /// Finds a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> JobBoardResult<Option<User>>;

    /// Finds a user by ID with the profile loaded.
    async fn find_with_profile(&self, id: UserId) -> JobBoardResult<Option<User>>;

    /// Lists applicants ordered by signup time, each with its profile.
    async fn find_applicants(&self, page: PageRequest) -> JobBoardResult<Page<User>>;

    /// Inserts a new user.
    ///
    /// A duplicate email is reported as [`jobboard_core::JobBoardError::EmailConflict`].
    async fn create(&self, user: &User) -> JobBoardResult<User>;

    /// Updates name, address and profile headline.
    async fn update(&self, user: &User) -> JobBoardResult<User>;

    /// Replaces the stored password hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> JobBoardResult<()>;

    /// Deletes a user and their applications, keeping job counters in step.
    ///
    /// Returns `false` when no such user exists.
    async fn delete(&self, id: UserId) -> JobBoardResult<bool>;
}

/// Job repository trait.
#[async_trait]
pub trait JobRepository: Interface + Send + Sync {
    /// Finds a job by ID.
    async fn find_by_id(&self, id: JobId) -> JobBoardResult<Option<Job>>;

    /// Finds a job with its poster and applicants.
    async fn find_with_applicants(&self, id: JobId) -> JobBoardResult<Option<JobWithApplicants>>;

    /// Lists jobs matching `filter`, newest first.
    async fn find_all(&self, filter: &JobFilter, page: PageRequest) -> JobBoardResult<Page<Job>>;

    /// Inserts a new job.
    async fn create(&self, job: &Job) -> JobBoardResult<Job>;

    /// Updates title, description and company name.
    async fn update(&self, job: &Job) -> JobBoardResult<Job>;

    /// Deletes a job. Returns `false` when no such job exists.
    async fn delete(&self, id: JobId) -> JobBoardResult<bool>;

    /// Records an application and bumps the job's counter atomically.
    ///
    /// Returns the new value of `total_applications`.
    async fn apply(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<i32>;

    /// Counts the application rows of a job.
    async fn application_count(&self, job_id: JobId) -> JobBoardResult<i64>;
}

/// Profile repository trait.
#[async_trait]
pub trait ProfileRepository: Interface + Send + Sync {
    /// Finds the profile of an applicant.
    async fn find_by_applicant(&self, applicant_id: UserId) -> JobBoardResult<Option<Profile>>;

    /// Inserts or replaces the profile of `profile.applicant_id`.
    async fn upsert(&self, profile: &Profile) -> JobBoardResult<Profile>;
}
