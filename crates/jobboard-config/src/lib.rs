//! # Jobboard Config
//!
//! Layered configuration: built-in defaults, TOML files under `config/`,
//! then `JOBBOARD__*` environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
