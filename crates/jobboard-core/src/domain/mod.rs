//! Domain entities of the job board.

pub mod job;
pub mod profile;
pub mod role;
pub mod user;

pub use job::*;
pub use profile::*;
pub use role::*;
pub use user::*;
