//! PostgreSQL user repository implementation.

use super::rows::{to_total, UserRow, UserWithProfileRow, JOINED_PROFILE_COLUMNS, USER_COLUMNS};
use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use jobboard_core::{unique_violation, JobBoardError, JobBoardResult, Page, PageRequest, User, UserId, UserRole};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PgUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> JobBoardResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> JobBoardResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_with_profile(&self, id: UserId) -> JobBoardResult<Option<User>> {
        debug!("Finding user with profile: {}", id);

        let sql = format!(
            "SELECT {USER_COLUMNS}, {JOINED_PROFILE_COLUMNS} \
             FROM users u LEFT JOIN profiles p ON p.applicant_id = u.id \
             WHERE u.id = $1"
        );
        let row = sqlx::query_as::<_, UserWithProfileRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_applicants(&self, page: PageRequest) -> JobBoardResult<Page<User>> {
        debug!("Finding applicants: page={}, page_size={}", page.page, page.page_size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_type = $1")
            .bind(UserRole::Applicant.as_str())
            .fetch_one(self.pool.inner())
            .await?;

        let sql = format!(
            "SELECT {USER_COLUMNS}, {JOINED_PROFILE_COLUMNS} \
             FROM users u LEFT JOIN profiles p ON p.applicant_id = u.id \
             WHERE u.user_type = $1 \
             ORDER BY u.created_at ASC, u.id ASC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, UserWithProfileRow>(&sql)
            .bind(UserRole::Applicant.as_str())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool.inner())
            .await?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<JobBoardResult<Vec<_>>>()?;

        Ok(Page::new(users, page, to_total(total)))
    }

    async fn create(&self, user: &User) -> JobBoardResult<User> {
        debug!("Creating user: {}", user.email);

        let sql = format!(
            "INSERT INTO users AS u (id, name, email, address, user_type, password_hash, profile_headline, \
                                     created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.into_inner())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.address)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .bind(&user.profile_headline)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| match unique_violation(&e).as_deref() {
                Some(EMAIL_CONSTRAINT) => JobBoardError::EmailConflict(user.email.clone()),
                _ => JobBoardError::from(e),
            })?;

        info!("User created: {}", row.id);
        User::try_from(row)
    }

    async fn update(&self, user: &User) -> JobBoardResult<User> {
        debug!("Updating user: {}", user.id);

        let sql = format!(
            "UPDATE users AS u SET name = $2, address = $3, profile_headline = $4, updated_at = now() \
             WHERE u.id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.into_inner())
            .bind(&user.name)
            .bind(&user.address)
            .bind(&user.profile_headline)
            .fetch_optional(self.pool.inner())
            .await?
            .ok_or_else(|| JobBoardError::not_found("User", user.id))?;

        User::try_from(row)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> JobBoardResult<()> {
        debug!("Updating password for user: {}", id);

        let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id.into_inner())
            .bind(password_hash)
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(JobBoardError::not_found("User", id));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> JobBoardResult<bool> {
        debug!("Deleting user: {}", id);

        let mut tx = self.pool.inner().begin().await?;

        // Same lock order as `apply`: job rows first, then the user.
        sqlx::query(
            r#"
            SELECT j.id FROM jobs j
            JOIN job_applications a ON a.job_id = j.id
            WHERE a.user_id = $1
            ORDER BY j.id
            FOR UPDATE OF j
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(&mut *tx)
        .await?;

        let locked: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let owns_jobs: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jobs WHERE posted_by_id = $1)")
            .bind(id.into_inner())
            .fetch_one(&mut *tx)
            .await?;
        if owns_jobs {
            return Err(JobBoardError::conflict(
                "User still has posted jobs; delete them first",
            ));
        }

        let decremented = sqlx::query(
            r#"
            UPDATE jobs
            SET total_applications = total_applications - 1, updated_at = now()
            WHERE id IN (SELECT job_id FROM job_applications WHERE user_id = $1)
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // Applications go with the user through ON DELETE CASCADE.
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("User deleted: {} ({} job counters adjusted)", id, decremented);
        Ok(true)
    }
}
