//! Application builder.

use crate::di::{build_module, InfrastructureResolver};
use crate::startup::{print_banner, print_startup_info, shutdown_signal};
use jobboard_config::{AppConfig, ConfigLoader};
use jobboard_core::{JobBoardError, JobBoardResult};
use jobboard_repository::{DatabasePool, DatabasePoolInterface};
use jobboard_rest::controllers::{CacheProbe, DatabaseProbe, HealthProbe};
use jobboard_rest::create_router;
use std::sync::Arc;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves the configuration, loading `./config` when none was set.
    pub fn resolve_config(self) -> JobBoardResult<AppConfig> {
        match self.config {
            Some(config) => Ok(config),
            None => ConfigLoader::from_default_location().load(),
        }
    }

    /// Builds and runs the application until a shutdown signal arrives.
    pub async fn run(self) -> JobBoardResult<()> {
        let config = self.resolve_config()?;

        print_banner();
        info!("Environment: {}", config.app.environment);

        let db_pool = DatabasePool::connect_with_retry(&config.database).await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        let module = build_module(&config, db_pool)?;
        let database = module.database_pool();
        let probes: Vec<Arc<dyn HealthProbe>> = vec![
            Arc::new(DatabaseProbe(database.clone())),
            Arc::new(CacheProbe(module.cache())),
        ];

        let router = create_router(&*module, &config.server, probes);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| JobBoardError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
        print_startup_info(&addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| JobBoardError::Internal(format!("HTTP server error: {}", e)))?;

        database.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
