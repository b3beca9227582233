//! Resume service trait definition.

use async_trait::async_trait;
use bytes::Bytes;
use jobboard_core::{Interface, JobBoardResult, Profile, UserId};

/// Resume service trait.
#[async_trait]
pub trait ResumeService: Interface + Send + Sync {
    /// Parses an uploaded resume and stores it as the applicant's profile.
    async fn process_resume(
        &self,
        user_id: UserId,
        file_name: Option<String>,
        document: Bytes,
    ) -> JobBoardResult<Profile>;

    /// Gets the stored profile of an applicant.
    async fn get_resume_data(&self, user_id: UserId) -> JobBoardResult<Profile>;
}
