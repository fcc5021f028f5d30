//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for promptc.
///
/// This struct represents the contents of `promptc.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Template discovery
    // =========================================================================
    /// Directory that bare template names are resolved against.
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Template used by `init` and by `--create-missing`.
    #[serde(default = "default_template_name")]
    pub default_template: String,

    /// Glob patterns that `list` treats as templates.
    #[serde(default = "default_template_globs")]
    pub template_globs: Vec<String>,

    // =========================================================================
    // Compilation
    // =========================================================================
    /// Lines starting with this marker are removed.
    #[serde(default = "default_comment_marker")]
    pub comment_marker: String,

    /// Binding that drives conditional selection.
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Whether `[[.Selector]]` placeholders are also substituted.
    #[serde(default)]
    pub substitute_selector: bool,

    /// Keys that are never substituted.
    #[serde(default)]
    pub exempt_keys: Vec<String>,

    // =========================================================================
    // Timestamp binding
    // =========================================================================
    /// Whether to bind the current time before compiling.
    #[serde(default = "default_true")]
    pub inject_timestamp: bool,

    /// Key the timestamp is bound to.
    #[serde(default = "default_timestamp_key")]
    pub timestamp_key: String,

    /// strftime pattern for the timestamp.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    // =========================================================================
    // Logging
    // =========================================================================
    /// NDJSON file that compile events are appended to (disabled when unset).
    #[serde(default)]
    pub events_log: Option<String>,

    // =========================================================================
    // Request body
    // =========================================================================
    /// Model name placed in the request body.
    #[serde(default = "default_model")]
    pub model: String,

    /// `max_tokens` placed in the request body.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// `temperature` placed in the request body.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Template for the user message that accompanies the compiled prompt.
    #[serde(default = "default_user_message")]
    pub user_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            default_template: default_template_name(),
            template_globs: default_template_globs(),
            comment_marker: default_comment_marker(),
            selector: default_selector(),
            substitute_selector: false,
            exempt_keys: Vec::new(),
            inject_timestamp: default_true(),
            timestamp_key: default_timestamp_key(),
            timestamp_format: default_timestamp_format(),
            events_log: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            user_message: default_user_message(),
        }
    }
}
