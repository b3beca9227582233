//! # Jobboard Repository
//!
//! Data access for users, profiles, jobs, and job applications.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn JobRepository> / Arc<dyn ProfileRepository>
//! Pg*Repository                 (SQLx, PostgreSQL)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! Transactions live here: applying to a job and deleting a user each run
//! as one unit so that `jobs.total_applications` always matches the number
//! of rows in `job_applications`.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
