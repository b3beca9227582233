//! Data Transfer Objects (DTOs).

mod auth_dto;
mod job_dto;
mod resume_dto;
mod user_dto;

pub use auth_dto::*;
pub use job_dto::*;
pub use resume_dto::*;
pub use user_dto::*;
