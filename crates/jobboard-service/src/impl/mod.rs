//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod job_service_impl;
pub mod resume_service_impl;
pub mod user_service_impl;

pub use job_service_impl::{JobServiceComponent, JobServiceComponentParameters};
pub use resume_service_impl::ResumeServiceComponent;
pub use user_service_impl::{UserServiceComponent, UserServiceComponentParameters};
