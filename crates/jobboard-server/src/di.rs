//! Dependency injection module using Shaku.
//!
//! `JobBoardModule` holds every component of the single-process deployment:
//! the Postgres pool and repositories, the security primitives, the cache,
//! the resume parser client and the four business services.

use jobboard_config::AppConfig;
use jobboard_core::JobBoardResult;
use jobboard_repository::{
    DatabasePool, DatabasePoolInterface, PgJobRepository, PgProfileRepository, PgUserRepository,
};
use jobboard_security::{PasswordHasher, TokenProvider, TokenProviderInterface};
use jobboard_service::{
    AuthService, AuthServiceComponent, CacheInterface, HttpResumeParser, InMemoryCacheService, JobService,
    JobServiceComponent, RedisCacheService, ResumeService, ResumeServiceComponent, UserService,
    UserServiceComponent,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub JobBoardModule {
        components = [
            DatabasePool,
            PgUserRepository,
            PgJobRepository,
            PgProfileRepository,
            PasswordHasher,
            TokenProvider,
            RedisCacheService,
            HttpResumeParser,
            UserServiceComponent,
            JobServiceComponent,
            ResumeServiceComponent,
            AuthServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module around an open database pool.
///
/// With Redis disabled the cache slot is filled by a process-local TTL
/// cache, so the read paths keep the same cache-aside behaviour.
pub fn build_module(config: &AppConfig, db_pool: DatabasePool) -> JobBoardResult<Arc<JobBoardModule>> {
    let security_config = Arc::new(config.security.clone());
    let cache_ttl = config.cache.ttl();

    let mut builder = JobBoardModule::builder()
        .with_component_parameters::<DatabasePool>(db_pool.into_parameters())
        .with_component_parameters::<PasswordHasher>(PasswordHasher::parameters(
            config.security.password_hash_cost,
        ))
        .with_component_parameters::<TokenProvider>(TokenProvider::parameters(security_config))
        .with_component_parameters::<HttpResumeParser>(HttpResumeParser::parameters(&config.resume_parser)?)
        .with_component_parameters::<UserServiceComponent>(UserServiceComponent::parameters(
            cache_ttl,
            config.security.allow_admin_signup,
        ))
        .with_component_parameters::<JobServiceComponent>(JobServiceComponent::parameters(cache_ttl));

    if config.redis.enabled {
        let pool = RedisCacheService::create_pool(&config.redis)?;
        builder = builder.with_component_parameters::<RedisCacheService>(
            RedisCacheService::new(Arc::new(pool)).into_parameters(),
        );
    } else {
        info!("Redis disabled, using in-process cache");
        builder = builder.with_component_override::<dyn CacheInterface>(Box::new(InMemoryCacheService::new()));
    }

    Ok(Arc::new(builder.build()))
}

/// Resolves the dependencies the health endpoint checks.
pub trait InfrastructureResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl InfrastructureResolver for JobBoardModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}

/// Resolves the business services.
pub trait ServiceResolver {
    fn user_service(&self) -> Arc<dyn UserService>;

    fn auth_service(&self) -> Arc<dyn AuthService>;

    fn job_service(&self) -> Arc<dyn JobService>;

    fn resume_service(&self) -> Arc<dyn ResumeService>;

    fn token_provider(&self) -> Arc<dyn TokenProviderInterface>;
}

impl ServiceResolver for JobBoardModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn auth_service(&self) -> Arc<dyn AuthService> {
        self.resolve()
    }

    fn job_service(&self) -> Arc<dyn JobService> {
        self.resolve()
    }

    fn resume_service(&self) -> Arc<dyn ResumeService> {
        self.resolve()
    }

    fn token_provider(&self) -> Arc<dyn TokenProviderInterface> {
        self.resolve()
    }
}
