//! Main application router.

use crate::{
    controllers::{
        auth_controller, health_controller, jobs_controller, resume_controller, user_controller, HealthProbe,
    },
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use jobboard_config::ServerConfig;
use jobboard_security::TokenProviderInterface;
use jobboard_service::{AuthService, JobService, ResumeService, UserService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Base path of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Creates the application router from a Shaku module.
pub fn create_router<M>(module: &M, server_config: &ServerConfig, probes: Vec<Arc<dyn HealthProbe>>) -> Router
where
    M: Module
        + HasComponent<dyn UserService>
        + HasComponent<dyn AuthService>
        + HasComponent<dyn JobService>
        + HasComponent<dyn ResumeService>
        + HasComponent<dyn TokenProviderInterface>,
{
    let token_provider: Arc<dyn TokenProviderInterface> = module.resolve();
    let state = AppState::from_module(module).with_probes(probes);

    build_router(state, AuthMiddlewareState::new(token_provider), server_config)
}

/// Creates the application router from already constructed services.
pub fn build_router(state: AppState, auth_state: AuthMiddlewareState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .merge(auth_controller::router())
        .merge(user_controller::router())
        .merge(jobs_controller::router())
        .merge(resume_controller::router())
        .merge(health_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state);

    let router = Router::new()
        .nest(API_PREFIX, api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under {} and Swagger UI at /swagger-ui", API_PREFIX);
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Job Board API v1"
}
