//! Application state for Axum handlers.

use crate::controllers::HealthProbe;
use jobboard_service::{AuthService, JobService, ResumeService, UserService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub auth_service: Arc<dyn AuthService>,
    pub job_service: Arc<dyn JobService>,
    pub resume_service: Arc<dyn ResumeService>,
    pub probes: Arc<Vec<Arc<dyn HealthProbe>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        auth_service: Arc<dyn AuthService>,
        job_service: Arc<dyn JobService>,
        resume_service: Arc<dyn ResumeService>,
    ) -> Self {
        Self {
            user_service,
            auth_service,
            job_service,
            resume_service,
            probes: Arc::new(Vec::new()),
        }
    }

    /// Resolves every service from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn UserService>
            + HasComponent<dyn AuthService>
            + HasComponent<dyn JobService>
            + HasComponent<dyn ResumeService>,
    {
        Self::new(module.resolve(), module.resolve(), module.resolve(), module.resolve())
    }

    /// Adds dependency checks reported by `/health`.
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        self.probes = Arc::new(probes);
        self
    }
}
