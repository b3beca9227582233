//! PostgreSQL repository implementations.

mod job_repository;
mod profile_repository;
mod rows;
mod user_repository;

pub use job_repository::PgJobRepository;
pub use profile_repository::PgProfileRepository;
pub use user_repository::PgUserRepository;
