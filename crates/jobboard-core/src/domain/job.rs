//! Job posting entity and its query filter.

use super::User;
use crate::{JobId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    /// Always equal to the number of rows in the job's application relation.
    pub total_applications: i32,
    pub posted_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job posted now with no applications.
    #[must_use]
    pub fn new(title: String, description: String, company_name: String, posted_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            title,
            description,
            company_name,
            posted_on: now,
            total_applications: 0,
            posted_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A job together with everyone who applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct JobWithApplicants {
    pub job: Job,
    pub posted_by: Option<User>,
    /// Ordered by application time.
    pub applicants: Vec<User>,
}

/// Filters accepted by the job listing.
///
/// Text filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobFilter {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub posted_after: Option<DateTime<Utc>>,
}

impl JobFilter {
    /// Trims text filters and drops the ones that end up empty.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: clean(self.title),
            company_name: clean(self.company_name),
            posted_after: self.posted_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_has_no_applications() {
        let job = Job::new(
            "Rust engineer".to_string(),
            "Build services".to_string(),
            "Acme".to_string(),
            UserId::new(),
        );
        assert_eq!(job.total_applications, 0);
        assert_eq!(job.posted_on, job.created_at);
    }

    #[test]
    fn test_filter_normalization() {
        let filter = JobFilter {
            title: Some("  rust ".to_string()),
            company_name: Some("   ".to_string()),
            posted_after: None,
        }
        .normalized();
        assert_eq!(filter.title.as_deref(), Some("rust"));
        assert!(filter.company_name.is_none());
    }
}
