//! # Jobboard REST
//!
//! Axum HTTP layer for the job board. Handlers translate requests into
//! service calls and wrap results in the `{ success, data, error }` envelope.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
