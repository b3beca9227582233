//! Database connection pool management.

use async_trait::async_trait;
use jobboard_config::DatabaseConfig;
use jobboard_core::{Interface, JobBoardError, JobBoardResult};
use jobboard_resilience::RetryPolicy;
use shaku::Component;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying PostgreSQL pool.
    fn inner(&self) -> &PgPool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> JobBoardResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> JobBoardResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens a pool with a single connection attempt.
    pub async fn connect(config: &DatabaseConfig) -> JobBoardResult<Self> {
        info!("Connecting to PostgreSQL database...");

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| JobBoardError::Database(format!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Opens a pool, retrying a bounded number of times while the database
    /// is still starting up.
    pub async fn connect_with_retry(config: &DatabaseConfig) -> JobBoardResult<Self> {
        let policy = RetryPolicy::fixed(config.connect_retry_attempts, config.connect_retry_delay());
        policy
            .execute("Database connection", || Self::connect(config))
            .await
            .map_err(|e| {
                warn!("Giving up on database connection");
                e
            })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Component parameters for registering the pool in a shaku module.
    #[must_use]
    pub fn into_parameters(self) -> DatabasePoolParameters {
        DatabasePoolParameters { pool: self.pool }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &PgPool {
        &self.pool
    }

    async fn health_check(&self) -> JobBoardResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| JobBoardError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> JobBoardResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| JobBoardError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
