//! Configuration loader with layered sources.

use crate::{AppConfig, DEV_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use jobboard_core::{JobBoardError, JobBoardResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix of environment variables read by the loader.
pub const ENV_PREFIX: &str = "JOBBOARD";

/// Variable selecting `config/{name}.toml`.
pub const ENV_NAME_VAR: &str = "JOBBOARD_ENV";

/// Minimum JWT secret length accepted outside development.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Loads [`AppConfig`] from files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader reading TOML files from `config_dir`.
    ///
    /// Sources are applied in order, later ones winning:
    /// 1. built-in defaults
    /// 2. `default.toml`, `{JOBBOARD_ENV}.toml`, `local.toml` (all optional)
    /// 3. `DATABASE_URL` / `REDIS_ADDR` for older deployments
    /// 4. `JOBBOARD__SECTION__KEY` environment variables
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration from the process environment.
    pub fn load(&self) -> JobBoardResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let vars: HashMap<String, String> = std::env::vars().collect();
        self.load_with_env(&vars)
    }

    /// Loads and validates the configuration from an explicit variable set.
    pub fn load_with_env(&self, vars: &HashMap<String, String>) -> JobBoardResult<AppConfig> {
        let environment = vars
            .get(ENV_NAME_VAR)
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.set_override("app.environment", environment.clone()).map_err(config_error)?;

        // Older deployments only set these two; prefixed variables still win.
        let prefixed_set = |key: &str| vars.contains_key(&format!("{ENV_PREFIX}__{key}"));
        if let Some(url) = vars
            .get("DATABASE_URL")
            .filter(|v| !v.is_empty() && !prefixed_set("DATABASE__URL"))
        {
            builder = builder.set_override("database.url", url.clone()).map_err(config_error)?;
        }
        if let Some(addr) = vars
            .get("REDIS_ADDR")
            .filter(|v| !v.is_empty() && !prefixed_set("REDIS__URL"))
        {
            builder = builder
                .set_override("redis.url", redis_url_from_addr(addr))
                .map_err(config_error)?;
        }

        let prefixed: config::Map<String, String> = vars
            .iter()
            .filter(|(key, _)| key.starts_with(&format!("{ENV_PREFIX}__")))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(prefixed)),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Turns a bare `host:port` into a Redis URL.
fn redis_url_from_addr(addr: &str) -> String {
    if addr.starts_with("redis://") || addr.starts_with("rediss://") {
        addr.to_string()
    } else {
        format!("redis://{addr}")
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> JobBoardResult<()> {
    if config.database.url.trim().is_empty() {
        return Err(JobBoardError::Configuration("Database URL is required".to_string()));
    }

    if config.database.max_connections == 0 || config.database.min_connections > config.database.max_connections {
        return Err(JobBoardError::Configuration(format!(
            "Invalid pool bounds: min {} / max {}",
            config.database.min_connections, config.database.max_connections
        )));
    }

    if config.database.connect_retry_attempts == 0 {
        return Err(JobBoardError::Configuration(
            "database.connect_retry_attempts must be at least 1".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(JobBoardError::Configuration("cache.ttl_secs must be positive".to_string()));
    }

    if config.redis.enabled && config.redis.pool_size == 0 {
        return Err(JobBoardError::Configuration("redis.pool_size must be positive".to_string()));
    }

    if !config.app.is_development() {
        if config.security.jwt_secret == DEV_JWT_SECRET || config.security.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(JobBoardError::Configuration(format!(
                "security.jwt_secret must be set to at least {MIN_JWT_SECRET_LEN} bytes outside development"
            )));
        }
    } else if config.security.jwt_secret == DEV_JWT_SECRET {
        warn!("Using the development JWT secret");
    }

    if config.resume_parser.api_key.as_deref().map_or(true, str::is_empty) {
        warn!("resume_parser.api_key is not set; resume uploads will fail");
    }

    Ok(())
}

fn config_error(err: ConfigError) -> JobBoardError {
    JobBoardError::Configuration(err.to_string())
}
