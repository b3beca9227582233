//! In-memory fakes shared by the service tests.

use crate::cache::{CacheInterface, InMemoryCacheService};
use async_trait::async_trait;
use jobboard_core::{
    Job, JobBoardError, JobBoardResult, JobFilter, JobId, JobWithApplicants, Page, PageRequest, Profile, User,
    UserId, UserRole,
};
use jobboard_repository::{JobRepository, ProfileRepository, UserRepository};
use jobboard_security::{PasswordHasher, PasswordHasherInterface};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Argon2 with minimal cost so tests stay fast.
pub fn fast_hasher() -> Arc<dyn PasswordHasherInterface> {
    Arc::new(PasswordHasher::with_params(
        argon2::Params::new(1024, 1, 1, None).unwrap(),
    ))
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    jobs: Vec<Job>,
    applications: Vec<(JobId, UserId)>,
    profiles: HashMap<UserId, Profile>,
}

/// One in-memory store implementing every repository trait.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
    pub job_list_queries: AtomicUsize,
    pub job_detail_queries: AtomicUsize,
    pub applicant_list_queries: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_user(&self, user: User) -> User {
        self.state.lock().users.push(user.clone());
        user
    }

    pub fn insert_job(&self, job: Job) -> Job {
        self.state.lock().jobs.push(job.clone());
        job
    }

    pub fn application_rows(&self, job_id: JobId) -> usize {
        self.state
            .lock()
            .applications
            .iter()
            .filter(|(j, _)| *j == job_id)
            .count()
    }

    pub fn job(&self, id: JobId) -> Option<Job> {
        self.state.lock().jobs.iter().find(|j| j.id == id).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.state.lock().users.iter().find(|u| u.id == id).cloned()
    }

    fn with_profile(state: &State, user: &User) -> User {
        let mut user = user.clone();
        user.profile = state.profiles.get(&user.id).cloned();
        user
    }
}

fn contains(haystack: &str, needle: Option<&String>) -> bool {
    needle.map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

fn slice<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(usize::try_from(page.offset()).unwrap())
        .take(usize::try_from(page.limit()).unwrap())
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn find_by_id(&self, id: UserId) -> JobBoardResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> JobBoardResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_with_profile(&self, id: UserId) -> JobBoardResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| Self::with_profile(&state, u)))
    }

    async fn find_applicants(&self, page: PageRequest) -> JobBoardResult<Page<User>> {
        self.applicant_list_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        let applicants: Vec<User> = state
            .users
            .iter()
            .filter(|u| u.is_applicant())
            .map(|u| Self::with_profile(&state, u))
            .collect();
        let total = applicants.len() as u64;
        Ok(Page::new(slice(&applicants, page), page, total))
    }

    async fn create(&self, user: &User) -> JobBoardResult<User> {
        let mut state = self.state.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(JobBoardError::EmailConflict(user.email.clone()));
        }
        state.users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> JobBoardResult<User> {
        let mut state = self.state.lock();
        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| JobBoardError::not_found("User", user.id))?;
        stored.name = user.name.clone();
        stored.address = user.address.clone();
        stored.profile_headline = user.profile_headline.clone();
        Ok(stored.clone())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> JobBoardResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| JobBoardError::not_found("User", id))?;
        stored.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> JobBoardResult<bool> {
        let mut state = self.state.lock();
        if !state.users.iter().any(|u| u.id == id) {
            return Ok(false);
        }
        if state.jobs.iter().any(|j| j.posted_by == id) {
            return Err(JobBoardError::conflict("User still has posted jobs"));
        }
        let applied: Vec<JobId> = state
            .applications
            .iter()
            .filter(|(_, u)| *u == id)
            .map(|(j, _)| *j)
            .collect();
        for job in state.jobs.iter_mut().filter(|j| applied.contains(&j.id)) {
            job.total_applications -= 1;
        }
        state.applications.retain(|(_, u)| *u != id);
        state.profiles.remove(&id);
        state.users.retain(|u| u.id != id);
        Ok(true)
    }
}

#[async_trait]
impl JobRepository for FakeStore {
    async fn find_by_id(&self, id: JobId) -> JobBoardResult<Option<Job>> {
        Ok(self.job(id))
    }

    async fn find_with_applicants(&self, id: JobId) -> JobBoardResult<Option<JobWithApplicants>> {
        self.job_detail_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        let Some(job) = state.jobs.iter().find(|j| j.id == id).cloned() else {
            return Ok(None);
        };
        let posted_by = state.users.iter().find(|u| u.id == job.posted_by).cloned();
        let applicants = state
            .applications
            .iter()
            .filter(|(j, _)| *j == id)
            .filter_map(|(_, u)| state.users.iter().find(|user| user.id == *u))
            .map(|u| Self::with_profile(&state, u))
            .collect();
        Ok(Some(JobWithApplicants {
            job,
            posted_by,
            applicants,
        }))
    }

    async fn find_all(&self, filter: &JobFilter, page: PageRequest) -> JobBoardResult<Page<Job>> {
        self.job_list_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        let mut jobs: Vec<Job> = state
            .jobs
            .iter()
            .filter(|j| contains(&j.title, filter.title.as_ref()))
            .filter(|j| contains(&j.company_name, filter.company_name.as_ref()))
            .filter(|j| filter.posted_after.map_or(true, |after| j.posted_on >= after))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.posted_on.cmp(&a.posted_on).then(b.id.into_inner().cmp(&a.id.into_inner())));
        let total = jobs.len() as u64;
        Ok(Page::new(slice(&jobs, page), page, total))
    }

    async fn create(&self, job: &Job) -> JobBoardResult<Job> {
        Ok(self.insert_job(job.clone()))
    }

    async fn update(&self, job: &Job) -> JobBoardResult<Job> {
        let mut state = self.state.lock();
        let stored = state
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| JobBoardError::not_found("Job", job.id))?;
        stored.title = job.title.clone();
        stored.description = job.description.clone();
        stored.company_name = job.company_name.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: JobId) -> JobBoardResult<bool> {
        let mut state = self.state.lock();
        let before = state.jobs.len();
        state.jobs.retain(|j| j.id != id);
        state.applications.retain(|(j, _)| *j != id);
        Ok(state.jobs.len() < before)
    }

    async fn apply(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<i32> {
        let mut state = self.state.lock();
        if !state.jobs.iter().any(|j| j.id == job_id) {
            return Err(JobBoardError::not_found("Job", job_id));
        }
        match state.users.iter().find(|u| u.id == user_id) {
            None => return Err(JobBoardError::not_found("User", user_id)),
            Some(u) if u.role != UserRole::Applicant => {
                return Err(JobBoardError::forbidden("Only applicants can apply to jobs"));
            }
            Some(_) => {}
        }
        if state.applications.contains(&(job_id, user_id)) {
            return Err(JobBoardError::already_applied(job_id, user_id));
        }
        state.applications.push((job_id, user_id));
        let job = state
            .jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| JobBoardError::not_found("Job", job_id))?;
        job.total_applications += 1;
        Ok(job.total_applications)
    }

    async fn application_count(&self, job_id: JobId) -> JobBoardResult<i64> {
        Ok(self.application_rows(job_id) as i64)
    }
}

#[async_trait]
impl ProfileRepository for FakeStore {
    async fn find_by_applicant(&self, applicant_id: UserId) -> JobBoardResult<Option<Profile>> {
        Ok(self.state.lock().profiles.get(&applicant_id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> JobBoardResult<Profile> {
        let mut state = self.state.lock();
        let stored = match state.profiles.get(&profile.applicant_id) {
            Some(existing) => Profile {
                id: existing.id,
                created_at: existing.created_at,
                ..profile.clone()
            },
            None => profile.clone(),
        };
        state.profiles.insert(profile.applicant_id, stored.clone());
        Ok(stored)
    }
}

/// Cache wrapper that counts calls and can be switched to fail every call.
#[derive(Default)]
pub struct InstrumentedCache {
    inner: InMemoryCacheService,
    failing: AtomicBool,
    pub gets: AtomicUsize,
    pub hits: AtomicUsize,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
    pub pattern_deletes: Mutex<Vec<String>>,
}

impl InstrumentedCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let cache = Self::default();
        cache.failing.store(true, Ordering::SeqCst);
        Arc::new(cache)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn patterns(&self) -> Vec<String> {
        self.pattern_deletes.lock().clone()
    }

    fn check(&self) -> JobBoardResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(JobBoardError::Cache("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for InstrumentedCache {
    async fn get_raw(&self, key: &str) -> JobBoardResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let value = self.inner.get_raw(key).await?;
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> JobBoardResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> JobBoardResult<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete(key).await
    }

    async fn delete_pattern(&self, pattern: &str) -> JobBoardResult<u64> {
        self.pattern_deletes.lock().push(pattern.to_string());
        self.check()?;
        self.inner.delete_pattern(pattern).await
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
