//! # Jobboard Service
//!
//! Business logic for the job board: the user, auth, job and resume
//! services, the cache they read through, and the resume parser client.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod job_service;
pub mod resume_parser;
pub mod resume_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use job_service::*;
pub use r#impl::*;
pub use resume_parser::*;
pub use resume_service::*;
pub use user_service::*;
