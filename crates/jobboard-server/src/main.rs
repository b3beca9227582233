//! # Jobboard Server
//!
//! Main entry point: loads configuration, initializes logging, and serves
//! the REST API until a shutdown signal arrives.

use jobboard_config::{ConfigLoader, ObservabilityConfig};
use jobboard_server::app::AppBuilder;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting Jobboard Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = AppBuilder::new().with_config(config).run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(observability: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if observability.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).init();
    }
}
