//! # Jobboard Security
//!
//! JWT issuance and validation, Argon2 password hashing, and the role guards
//! used by the API layer.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
