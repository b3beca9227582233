//! Result type aliases for the job board.

use crate::JobBoardError;

/// A specialized `Result` type for job board operations.
pub type JobBoardResult<T> = Result<T, JobBoardError>;
