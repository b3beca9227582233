//! Applicant profile entity.

use crate::{ProfileId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resume fields extracted for one applicant.
///
/// There is at most one profile per applicant; processing a new resume
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    pub id: ProfileId,
    pub applicant_id: UserId,
    /// Original name of the uploaded file.
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

impl Profile {
    /// Creates an empty profile for an applicant.
    #[must_use]
    pub fn new(applicant_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: ProfileId::new(),
            applicant_id,
            resume_file_name: None,
            skills: Vec::new(),
            education: Vec::new(),
            experience: Vec::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
