//! Default values for configuration fields.

use crate::template::{DEFAULT_COMMENT_MARKER, DEFAULT_SELECTOR};

/// Default file name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "promptc.yaml";

/// Environment variable that overrides the configuration file path.
pub const CONFIG_ENV_VAR: &str = "PROMPTC_CONFIG";

/// Default glob patterns for template discovery.
pub fn default_template_globs() -> Vec<String> {
    vec!["*.txt".to_string(), "*.md".to_string(), "*.tmpl".to_string()]
}

pub(crate) fn default_template_dir() -> String {
    "templates".to_string()
}
pub(crate) fn default_template_name() -> String {
    "essay_writer.txt".to_string()
}
pub(crate) fn default_comment_marker() -> String {
    DEFAULT_COMMENT_MARKER.to_string()
}
pub(crate) fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}
pub(crate) fn default_timestamp_key() -> String {
    "Now".to_string()
}
pub(crate) fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S UTC".to_string()
}
pub(crate) fn default_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}
pub(crate) fn default_max_tokens() -> u32 {
    2000
}
pub(crate) fn default_temperature() -> f32 {
    0.7
}
pub(crate) fn default_user_message() -> String {
    "Please write the essay about [[.Topic]] as specified in the instructions.".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
