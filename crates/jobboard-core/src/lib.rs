//! # Jobboard Core
//!
//! Core types, domain entities, and error definitions shared by every layer
//! of the job board: the error taxonomy, typed identifiers, pagination math,
//! and validation helpers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
