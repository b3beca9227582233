//! Health check controller.

use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use jobboard_core::JobBoardResult;
use jobboard_repository::DatabasePoolInterface;
use jobboard_service::CacheInterface;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

/// A dependency checked by `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name reported in the response.
    fn component(&self) -> &'static str;

    /// Whether a failure makes the whole service unhealthy.
    fn critical(&self) -> bool;

    async fn check(&self) -> JobBoardResult<()>;
}

/// Checks the relational store.
pub struct DatabaseProbe(pub Arc<dyn DatabasePoolInterface>);

#[async_trait]
impl HealthProbe for DatabaseProbe {
    fn component(&self) -> &'static str {
        "database"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn check(&self) -> JobBoardResult<()> {
        self.0.health_check().await
    }
}

/// Checks the cache. The service keeps working without it.
pub struct CacheProbe(pub Arc<dyn CacheInterface>);

#[async_trait]
impl HealthProbe for CacheProbe {
    fn component(&self) -> &'static str {
        "cache"
    }

    fn critical(&self) -> bool {
        false
    }

    async fn check(&self) -> JobBoardResult<()> {
        self.0.ping().await
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, `degraded` or `unhealthy`.
    pub status: String,
    /// Application version.
    pub version: String,
    pub components: Vec<ComponentHealth>,
}

/// State of one dependency.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub name: String,
    pub healthy: bool,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports store and cache reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "The store is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = Vec::with_capacity(state.probes.len());
    let mut degraded = false;
    let mut unhealthy = false;

    for probe in state.probes.iter() {
        let healthy = match probe.check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Health check failed for {}: {}", probe.component(), e);
                false
            }
        };
        if !healthy {
            if probe.critical() {
                unhealthy = true;
            } else {
                degraded = true;
            }
        }
        components.push(ComponentHealth {
            name: probe.component().to_string(),
            healthy,
        });
    }

    let (status, label) = if unhealthy {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    } else if degraded {
        (StatusCode::OK, "degraded")
    } else {
        (StatusCode::OK, "healthy")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            components,
        }),
    )
}
