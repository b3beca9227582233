//! PostgreSQL job repository implementation.

use super::rows::{
    contains_pattern, is_foreign_key_violation, to_total, JobRow, UserRow, UserWithProfileRow, JOB_COLUMNS,
    JOINED_PROFILE_COLUMNS, USER_COLUMNS,
};
use crate::{traits::JobRepository, DatabasePoolInterface};
use async_trait::async_trait;
use jobboard_core::{
    unique_violation, Job, JobBoardError, JobBoardResult, JobFilter, JobId, JobWithApplicants, Page, PageRequest,
    User, UserId, UserRole,
};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const APPLICATION_CONSTRAINT: &str = "job_applications_pkey";

/// PostgreSQL job repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = JobRepository)]
pub struct PgJobRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgJobRepository {
    /// Creates a new PostgreSQL job repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn find_by_id(&self, id: JobId) -> JobBoardResult<Option<Job>> {
        debug!("Finding job by id: {}", id);

        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = $1");
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Job::from))
    }

    async fn find_with_applicants(&self, id: JobId) -> JobBoardResult<Option<JobWithApplicants>> {
        debug!("Finding job with applicants: {}", id);

        let Some(job) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let poster_sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        let posted_by = sqlx::query_as::<_, UserRow>(&poster_sql)
            .bind(job.posted_by.into_inner())
            .fetch_optional(self.pool.inner())
            .await?
            .map(User::try_from)
            .transpose()?;

        let applicants_sql = format!(
            "SELECT {USER_COLUMNS}, {JOINED_PROFILE_COLUMNS} \
             FROM job_applications a \
             JOIN users u ON u.id = a.user_id \
             LEFT JOIN profiles p ON p.applicant_id = u.id \
             WHERE a.job_id = $1 \
             ORDER BY a.applied_at ASC, u.id ASC"
        );
        let applicants = sqlx::query_as::<_, UserWithProfileRow>(&applicants_sql)
            .bind(id.into_inner())
            .fetch_all(self.pool.inner())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect::<JobBoardResult<Vec<_>>>()?;

        Ok(Some(JobWithApplicants {
            job,
            posted_by,
            applicants,
        }))
    }

    async fn find_all(&self, filter: &JobFilter, page: PageRequest) -> JobBoardResult<Page<Job>> {
        debug!("Finding jobs: {:?}, page={}, page_size={}", filter, page.page, page.page_size);

        let title = filter.title.as_deref().map(contains_pattern);
        let company = filter.company_name.as_deref().map(contains_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM jobs j
            WHERE ($1::text IS NULL OR j.title ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR j.company_name ILIKE $2 ESCAPE '\')
              AND ($3::timestamptz IS NULL OR j.posted_on >= $3)
            "#,
        )
        .bind(title.as_deref())
        .bind(company.as_deref())
        .bind(filter.posted_after)
        .fetch_one(self.pool.inner())
        .await?;

        let sql = format!(
            r#"
            SELECT {JOB_COLUMNS} FROM jobs j
            WHERE ($1::text IS NULL OR j.title ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR j.company_name ILIKE $2 ESCAPE '\')
              AND ($3::timestamptz IS NULL OR j.posted_on >= $3)
            ORDER BY j.posted_on DESC, j.id DESC
            LIMIT $4 OFFSET $5
            "#
        );
        let jobs = sqlx::query_as::<_, JobRow>(&sql)
            .bind(title.as_deref())
            .bind(company.as_deref())
            .bind(filter.posted_after)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool.inner())
            .await?
            .into_iter()
            .map(Job::from)
            .collect();

        Ok(Page::new(jobs, page, to_total(total)))
    }

    async fn create(&self, job: &Job) -> JobBoardResult<Job> {
        debug!("Creating job: {}", job.title);

        let sql = format!(
            "INSERT INTO jobs AS j (id, title, description, company_name, posted_on, total_applications, \
                                   posted_by_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $8) \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(job.id.into_inner())
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.company_name)
            .bind(job.posted_on)
            .bind(job.posted_by.into_inner())
            .bind(job.created_at)
            .bind(job.updated_at)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    JobBoardError::not_found("User", job.posted_by)
                } else {
                    JobBoardError::from(e)
                }
            })?;

        info!("Job created: {}", row.id);
        Ok(Job::from(row))
    }

    async fn update(&self, job: &Job) -> JobBoardResult<Job> {
        debug!("Updating job: {}", job.id);

        let sql = format!(
            "UPDATE jobs AS j SET title = $2, description = $3, company_name = $4, updated_at = now() \
             WHERE j.id = $1 \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(job.id.into_inner())
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.company_name)
            .fetch_optional(self.pool.inner())
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", job.id))?;

        Ok(Job::from(row))
    }

    async fn delete(&self, id: JobId) -> JobBoardResult<bool> {
        debug!("Deleting job: {}", id);

        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<i32> {
        debug!("User {} applying to job {}", user_id, job_id);

        let mut tx = self.pool.inner().begin().await?;

        // Serializes every application to this job until commit.
        let locked: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(job_id.into_inner())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(JobBoardError::not_found("Job", job_id));
        }

        let user_type: Option<String> = sqlx::query_scalar("SELECT user_type FROM users WHERE id = $1")
            .bind(user_id.into_inner())
            .fetch_optional(&mut *tx)
            .await?;
        match user_type.as_deref() {
            None => return Err(JobBoardError::not_found("User", user_id)),
            Some(t) if t != UserRole::Applicant.as_str() => {
                return Err(JobBoardError::forbidden("Only applicants can apply to jobs"));
            }
            Some(_) => {}
        }

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM job_applications WHERE job_id = $1 AND user_id = $2)",
        )
        .bind(job_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&mut *tx)
        .await?;
        if already {
            return Err(JobBoardError::already_applied(job_id, user_id));
        }

        sqlx::query("INSERT INTO job_applications (job_id, user_id) VALUES ($1, $2)")
            .bind(job_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if unique_violation(&e).as_deref() == Some(APPLICATION_CONSTRAINT) {
                    JobBoardError::already_applied(job_id, user_id)
                } else if is_foreign_key_violation(&e) {
                    JobBoardError::not_found("User", user_id)
                } else {
                    JobBoardError::from(e)
                }
            })?;

        let total: i32 = sqlx::query_scalar(
            r#"
            UPDATE jobs
            SET total_applications = total_applications + 1, updated_at = now()
            WHERE id = $1
            RETURNING total_applications
            "#,
        )
        .bind(job_id.into_inner())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("User {} applied to job {} (total: {})", user_id, job_id, total);
        Ok(total)
    }

    async fn application_count(&self, job_id: JobId) -> JobBoardResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE job_id = $1")
            .bind(job_id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count)
    }
}
