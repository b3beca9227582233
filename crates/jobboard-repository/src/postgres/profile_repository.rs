//! PostgreSQL profile repository implementation.

use super::rows::{is_foreign_key_violation, ProfileRow};
use crate::{traits::ProfileRepository, DatabasePoolInterface};
use async_trait::async_trait;
use jobboard_core::{JobBoardError, JobBoardResult, Profile, UserId};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

const PROFILE_COLUMNS: &str = "id, applicant_id, resume_file_name, skills, education, experience, \
     name, email, phone, created_at, updated_at";

/// PostgreSQL profile repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProfileRepository)]
pub struct PgProfileRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgProfileRepository {
    /// Creates a new PostgreSQL profile repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_applicant(&self, applicant_id: UserId) -> JobBoardResult<Option<Profile>> {
        debug!("Finding profile of applicant: {}", applicant_id);

        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE applicant_id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(applicant_id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn upsert(&self, profile: &Profile) -> JobBoardResult<Profile> {
        debug!("Upserting profile of applicant: {}", profile.applicant_id);

        // The existing row keeps its id and created_at.
        let sql = format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (applicant_id) DO UPDATE SET \
                 resume_file_name = EXCLUDED.resume_file_name, \
                 skills = EXCLUDED.skills, \
                 education = EXCLUDED.education, \
                 experience = EXCLUDED.experience, \
                 name = EXCLUDED.name, \
                 email = EXCLUDED.email, \
                 phone = EXCLUDED.phone, \
                 updated_at = now() \
             RETURNING {PROFILE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.id.into_inner())
            .bind(profile.applicant_id.into_inner())
            .bind(&profile.resume_file_name)
            .bind(&profile.skills)
            .bind(&profile.education)
            .bind(&profile.experience)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    JobBoardError::not_found("User", profile.applicant_id)
                } else {
                    JobBoardError::from(e)
                }
            })?;

        info!("Profile stored for applicant: {}", row.applicant_id);
        Ok(Profile::from(row))
    }
}
