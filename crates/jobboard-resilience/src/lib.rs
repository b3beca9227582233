//! # Jobboard Resilience
//!
//! Bounded retry for infrastructure setup. Request handling never retries.

pub mod retry;

pub use retry::*;
