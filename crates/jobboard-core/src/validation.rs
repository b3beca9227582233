//! Validation utilities.

use crate::{FieldError, JobBoardError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `JobBoardError` on failure.
    fn validate_request(&self) -> Result<(), JobBoardError> {
        self.validate().map_err(validation_errors_to_job_board_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field
/// name so messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `JobBoardError`.
#[must_use]
pub fn validation_errors_to_job_board_error(errors: ValidationErrors) -> JobBoardError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    JobBoardError::Validation(message)
}

/// Fails with a validation error when `value` is empty after trimming.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), JobBoardError> {
    if value.trim().is_empty() {
        return Err(JobBoardError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Common validation functions for `#[validate(custom(...))]`.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            let mut error = ValidationError::new("not_blank");
            error.message = Some("must not be blank".into());
            return Err(error);
        }
        Ok(())
    }
}
