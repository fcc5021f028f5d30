//! Configuration model for promptc.
//!
//! This module defines the Config struct that represents `promptc.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
