//! Row types shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use jobboard_core::{Job, JobBoardError, JobId, Profile, ProfileId, User, UserId, UserRole, PG_FOREIGN_KEY_VIOLATION};
use sqlx::FromRow;
use uuid::Uuid;

/// Columns selected for a user, in table order.
pub(crate) const USER_COLUMNS: &str =
    "u.id, u.name, u.email, u.address, u.user_type, u.password_hash, u.profile_headline, u.created_at, u.updated_at";

/// Columns selected for a job, in table order.
pub(crate) const JOB_COLUMNS: &str = "j.id, j.title, j.description, j.company_name, j.posted_on, \
     j.total_applications, j.posted_by_id, j.created_at, j.updated_at";

/// Profile columns aliased with a `p_` prefix for LEFT JOINs against `users`.
pub(crate) const JOINED_PROFILE_COLUMNS: &str = "p.id AS p_id, p.resume_file_name AS p_resume_file_name, \
     p.skills AS p_skills, p.education AS p_education, p.experience AS p_experience, \
     p.name AS p_name, p.email AS p_email, p.phone AS p_phone, \
     p.created_at AS p_created_at, p.updated_at AS p_updated_at";

/// Database row representation of a user.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub user_type: String,
    pub password_hash: String,
    pub profile_headline: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = JobBoardError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .user_type
            .parse::<UserRole>()
            .map_err(|e| JobBoardError::Internal(format!("Invalid user type in database: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            address: row.address,
            role,
            password_hash: row.password_hash,
            profile_headline: row.profile_headline,
            profile: None,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A user LEFT JOINed with its profile.
#[derive(Debug, FromRow)]
pub(crate) struct UserWithProfileRow {
    #[sqlx(flatten)]
    pub user: UserRow,
    pub p_id: Option<Uuid>,
    pub p_resume_file_name: Option<String>,
    pub p_skills: Option<Vec<String>>,
    pub p_education: Option<Vec<String>>,
    pub p_experience: Option<Vec<String>>,
    pub p_name: Option<String>,
    pub p_email: Option<String>,
    pub p_phone: Option<String>,
    pub p_created_at: Option<DateTime<Utc>>,
    pub p_updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserWithProfileRow> for User {
    type Error = JobBoardError;

    fn try_from(row: UserWithProfileRow) -> Result<Self, Self::Error> {
        let mut user = User::try_from(row.user)?;

        if let Some(profile_id) = row.p_id {
            user.profile = Some(Profile {
                id: ProfileId::from_uuid(profile_id),
                applicant_id: user.id,
                resume_file_name: row.p_resume_file_name,
                skills: row.p_skills.unwrap_or_default(),
                education: row.p_education.unwrap_or_default(),
                experience: row.p_experience.unwrap_or_default(),
                name: row.p_name.unwrap_or_default(),
                email: row.p_email.unwrap_or_default(),
                phone: row.p_phone.unwrap_or_default(),
                created_at: row.p_created_at.unwrap_or(user.created_at),
                updated_at: row.p_updated_at.unwrap_or(user.updated_at),
            });
        }

        Ok(user)
    }
}

/// Database row representation of a profile.
#[derive(Debug, FromRow)]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub resume_file_name: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::from_uuid(row.id),
            applicant_id: UserId::from_uuid(row.applicant_id),
            resume_file_name: row.resume_file_name,
            skills: row.skills,
            education: row.education,
            experience: row.experience,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row representation of a job.
#[derive(Debug, FromRow)]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            company_name: row.company_name,
            posted_on: row.posted_on,
            total_applications: row.total_applications,
            posted_by: UserId::from_uuid(row.posted_by_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Builds an `ILIKE` pattern matching `value` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with `\`.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Whether `err` is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

/// Converts a row count returned by `COUNT(*)` into the page total.
pub(crate) fn to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\dir"), "%c:\\\\dir%");
    }

    #[test]
    fn test_user_row_conversion() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::now_v7(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: String::new(),
            user_type: "ADMIN".to_string(),
            password_hash: "hash".to_string(),
            profile_headline: String::new(),
            created_at: now,
            updated_at: now,
        };

        let user = User::try_from(row).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.profile.is_none());
    }

    #[test]
    fn test_user_row_rejects_unknown_type() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::now_v7(),
            name: "Eve".to_string(),
            email: "eve@example.com".to_string(),
            address: String::new(),
            user_type: "ROOT".to_string(),
            password_hash: "hash".to_string(),
            profile_headline: String::new(),
            created_at: now,
            updated_at: now,
        };

        assert!(matches!(User::try_from(row), Err(JobBoardError::Internal(_))));
    }

    #[test]
    fn test_to_total_clamps_negative() {
        assert_eq!(to_total(-1), 0);
        assert_eq!(to_total(42), 42);
    }
}
