//! REST API controllers.

pub mod auth_controller;
pub mod health_controller;
pub mod jobs_controller;
pub mod resume_controller;
pub mod user_controller;

pub use health_controller::{CacheProbe, DatabaseProbe, HealthProbe};

use crate::responses::AppError;
use jobboard_core::JobBoardError;
use std::str::FromStr;

/// Parses an id taken from the request path.
fn parse_id<T: FromStr>(kind: &str, raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError(JobBoardError::validation(format!("Invalid {kind} id: {raw}"))))
}
