//! Error types for the promptc CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for promptc operations.
#[derive(Error, Debug)]
pub enum PromptcError {
    /// The named template source could not be located.
    #[error("template not found: {}", .0.display())]
    NotFound(PathBuf),

    /// User provided invalid arguments or an operation on disk failed.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read, parsed, or validated.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Placeholders were left in the output and strict mode was requested.
    #[error("unresolved placeholders: {}", .0.join(", "))]
    Unresolved(Vec<String>),
}

impl PromptcError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptcError::NotFound(_) => exit_codes::NOT_FOUND,
            PromptcError::UserError(_) => exit_codes::USER_ERROR,
            PromptcError::ConfigError(_) => exit_codes::USER_ERROR,
            PromptcError::Unresolved(_) => exit_codes::UNRESOLVED,
        }
    }
}

/// Result type alias for promptc operations.
pub type Result<T> = std::result::Result<T, PromptcError>;
