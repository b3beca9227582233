//! Job service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{ApplyResponse, CreateJobRequest, JobDetailResponse, JobResponse, UpdateJobRequest};
use crate::job_service::JobService;
use async_trait::async_trait;
use jobboard_core::{
    require_non_blank, Job, JobBoardError, JobBoardResult, JobFilter, JobId, Page, PageRequest, UserId, ValidateExt,
};
use jobboard_repository::JobRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Job service component for Shaku DI.
///
/// Reads are cache-aside. Every mutation evicts the list namespace together
/// with the entity key of the job it touched.
#[derive(Component)]
#[shaku(interface = JobService)]
pub struct JobServiceComponent {
    #[shaku(inject)]
    job_repository: Arc<dyn JobRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl JobServiceComponent {
    /// Creates a job service outside of a DI module.
    pub fn new(job_repository: Arc<dyn JobRepository>, cache: Arc<dyn CacheInterface>, cache_ttl: Duration) -> Self {
        Self {
            job_repository,
            cache,
            cache_ttl,
        }
    }

    /// Component parameters for registering the service in a shaku module.
    #[must_use]
    pub fn parameters(cache_ttl: Duration) -> JobServiceComponentParameters {
        JobServiceComponentParameters { cache_ttl }
    }

    async fn invalidate(&self, id: Option<JobId>) {
        if let Some(id) = id {
            self.cache.evict(&cache_keys::job_by_id(id)).await;
        }
        self.cache.evict_pattern(&cache_keys::job_list_pattern()).await;
    }
}

#[async_trait]
impl JobService for JobServiceComponent {
    async fn list_jobs(&self, filter: JobFilter, page: PageRequest) -> JobBoardResult<Page<JobResponse>> {
        let filter = filter.normalized();
        let page = page.normalized();
        debug!("Listing jobs {:?}, page: {}, size: {}", filter, page.page, page.page_size);

        let cache_key = cache_keys::job_list(&filter, page);
        if let Some(cached) = self.cache.get_or_miss::<Page<JobResponse>>(&cache_key).await {
            debug!("Cache hit for {}", cache_key);
            return Ok(cached);
        }

        let response = self.job_repository.find_all(&filter, page).await?.map(JobResponse::from);

        self.cache.set_quietly(&cache_key, &response, self.cache_ttl).await;

        Ok(response)
    }

    async fn get_job_with_applicants(&self, id: JobId) -> JobBoardResult<JobDetailResponse> {
        debug!("Getting job with applicants: {}", id);

        let cache_key = cache_keys::job_by_id(id);
        if let Some(cached) = self.cache.get_or_miss::<JobDetailResponse>(&cache_key).await {
            debug!("Cache hit for job: {}", id);
            return Ok(cached);
        }

        let job = self
            .job_repository
            .find_with_applicants(id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", id))?;

        let response = JobDetailResponse::from(job);

        self.cache.set_quietly(&cache_key, &response, self.cache_ttl).await;

        Ok(response)
    }

    async fn create_job(&self, posted_by: UserId, request: CreateJobRequest) -> JobBoardResult<JobResponse> {
        debug!("Creating job '{}' for admin {}", request.title, posted_by);

        require_non_blank("title", &request.title)?;
        require_non_blank("description", &request.description)?;
        request.validate_request()?;

        let mut job = Job::new(
            request.title.trim().to_string(),
            request.description,
            request.company_name.trim().to_string(),
            posted_by,
        );
        if let Some(posted_on) = request.posted_on {
            job.posted_on = posted_on;
        }

        let saved = self.job_repository.create(&job).await?;

        self.invalidate(None).await;

        info!("Job created: {}", saved.id);
        Ok(JobResponse::from(saved))
    }

    async fn apply_to_job(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<ApplyResponse> {
        debug!("User {} applying to job {}", user_id, job_id);

        let total_applications = self.job_repository.apply(job_id, user_id).await?;

        self.invalidate(Some(job_id)).await;

        info!("User {} applied to job {} ({} applications)", user_id, job_id, total_applications);
        Ok(ApplyResponse {
            job_id,
            total_applications,
        })
    }

    async fn update_job(&self, id: JobId, request: UpdateJobRequest) -> JobBoardResult<JobResponse> {
        debug!("Updating job: {}", id);

        request.validate_request()?;
        if let Some(title) = &request.title {
            require_non_blank("title", title)?;
        }
        if let Some(description) = &request.description {
            require_non_blank("description", description)?;
        }

        let mut job = self
            .job_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", id))?;

        if let Some(title) = request.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            job.description = description;
        }
        if let Some(company_name) = request.company_name {
            job.company_name = company_name.trim().to_string();
        }

        let updated = self.job_repository.update(&job).await?;

        self.invalidate(Some(id)).await;

        info!("Job updated: {}", id);
        Ok(JobResponse::from(updated))
    }

    async fn delete_job(&self, id: JobId) -> JobBoardResult<()> {
        debug!("Deleting job: {}", id);

        if !self.job_repository.delete(id).await? {
            return Err(JobBoardError::not_found("Job", id));
        }

        self.invalidate(Some(id)).await;

        info!("Job deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for JobServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobServiceComponent")
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
