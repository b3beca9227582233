//! Resume service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::resume_parser::ResumeParser;
use crate::resume_service::ResumeService;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use jobboard_core::{JobBoardError, JobBoardResult, Profile, UserId};
use jobboard_repository::ProfileRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Resume service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = ResumeService)]
pub struct ResumeServiceComponent {
    #[shaku(inject)]
    profile_repository: Arc<dyn ProfileRepository>,
    #[shaku(inject)]
    resume_parser: Arc<dyn ResumeParser>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ResumeServiceComponent {
    /// Creates a resume service outside of a DI module.
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        resume_parser: Arc<dyn ResumeParser>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            profile_repository,
            resume_parser,
            cache,
        }
    }
}

#[async_trait]
impl ResumeService for ResumeServiceComponent {
    async fn process_resume(
        &self,
        user_id: UserId,
        file_name: Option<String>,
        document: Bytes,
    ) -> JobBoardResult<Profile> {
        debug!("Processing resume for applicant {} ({} bytes)", user_id, document.len());

        if document.is_empty() {
            return Err(JobBoardError::validation("resume file is empty"));
        }

        let parsed = self.resume_parser.parse(document).await.map_err(|e| {
            error!("Resume parsing failed for applicant {}: {}", user_id, e);
            e
        })?;

        let mut profile = Profile::new(user_id);
        profile.resume_file_name = file_name.filter(|n| !n.trim().is_empty());
        profile.education = parsed.education_names();
        profile.experience = parsed.experience_names();
        profile.name = parsed.name;
        profile.email = parsed.email;
        profile.phone = parsed.phone;
        profile.skills = parsed.skills;
        profile.updated_at = Utc::now();

        let saved = self.profile_repository.upsert(&profile).await?;

        // Applicant pages and job details embed the profile.
        self.cache.evict_pattern(&cache_keys::applicant_list_pattern()).await;
        self.cache.evict_pattern(&cache_keys::jobs_namespace_pattern()).await;

        info!("Profile stored for applicant {}", user_id);
        Ok(saved)
    }

    async fn get_resume_data(&self, user_id: UserId) -> JobBoardResult<Profile> {
        debug!("Getting resume data for applicant {}", user_id);

        self.profile_repository
            .find_by_applicant(user_id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Profile", user_id))
    }
}

impl std::fmt::Debug for ResumeServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeServiceComponent").finish_non_exhaustive()
    }
}
