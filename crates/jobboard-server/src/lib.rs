//! # Jobboard Server Library
//!
//! Dependency injection wiring and startup for the job board server.

pub mod app;
pub mod di;
pub mod startup;
