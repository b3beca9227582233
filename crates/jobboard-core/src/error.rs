//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// SQLSTATE raised by PostgreSQL on a unique constraint violation.
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE raised by PostgreSQL on a foreign key violation.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Unified error type for the job board.
///
/// Variants are grouped by how a caller should react to them: client
/// errors are user-correctable and never retried, dependency errors come
/// from the store, the cache, or the resume parser and may be transient.
#[derive(Error, Debug)]
pub enum JobBoardError {
    // ============ Client Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Missing or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic conflict with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Another account already uses this email
    #[error("Email already exists: {0}")]
    EmailConflict(String),

    /// The (job, user) pair is already present in the application relation
    #[error("User {user_id} has already applied to job {job_id}")]
    AlreadyApplied { job_id: String, user_id: String },

    // ============ Authentication/Authorization Errors ============
    /// Missing or unusable authentication
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Dependency Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// External service error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JobBoardError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) | Self::EmailConflict(_) | Self::AlreadyApplied { .. } => 409,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::ExternalService { .. } => 502,
            Self::Timeout(_) => 503,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::EmailConflict(_) => "EMAIL_CONFLICT",
            Self::AlreadyApplied { .. } => "ALREADY_APPLIED",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an already-applied error for a (job, user) pair.
    #[must_use]
    pub fn already_applied<J: ToString, U: ToString>(job_id: J, user_id: U) -> Self {
        Self::AlreadyApplied {
            job_id: job_id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is a conflict of any kind.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_) | Self::EmailConflict(_) | Self::AlreadyApplied { .. }
        )
    }

    /// Checks if this error originates from the store, the cache, or an
    /// external collaborator. These may be transient.
    #[must_use]
    pub const fn is_dependency(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Cache(_) | Self::ExternalService { .. } | Self::Timeout(_)
        )
    }

    /// Message safe to return to API clients.
    ///
    /// Dependency and internal failures are reduced to a generic sentence so
    /// that connection strings and SQL never reach a response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Cache(_) | Self::Timeout(_) => {
                "A backing service is temporarily unavailable".to_string()
            }
            Self::ExternalService { service, .. } => format!("{service} request failed"),
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for JobBoardError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION | PG_FOREIGN_KEY_VIOLATION) => {
                    Self::Conflict(db_err.message().to_string())
                }
                _ => Self::Database(err.to_string()),
            },
            sqlx::Error::PoolTimedOut => Self::Timeout("database pool timed out".to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Returns the violated constraint name when `err` is a unique violation.
#[cfg(feature = "sqlx")]
#[must_use]
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

impl From<serde_json::Error> for JobBoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `JobBoardError`.
    #[must_use]
    pub fn from_error(error: &JobBoardError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&JobBoardError> for ErrorResponse {
    fn from(error: &JobBoardError) -> Self {
        Self::from_error(error)
    }
}
