//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::bindings::is_valid_timestamp_format;
use crate::error::{PromptcError, Result};
use crate::template::{CompileOptions, Compiler, is_identifier};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the promptc.yaml file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PromptcError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptcError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Locate and load the active configuration.
    ///
    /// Resolution order:
    /// 1. `explicit` (the `--config` flag), which must exist
    /// 2. the `PROMPTC_CONFIG` environment variable (relative to `base`), which
    ///    must exist if set
    /// 3. `promptc.yaml` in `base`, if present
    /// 4. built-in defaults
    pub fn discover(explicit: Option<&Path>, base: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
            && !env_path.trim().is_empty()
        {
            return Self::load(base.join(env_path.trim()));
        }

        let local = base.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(local);
        }

        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PromptcError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PromptcError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `template_dir` and `default_template` must be non-empty
    /// - an empty `comment_marker` disables comment stripping
    /// - `selector`, `timestamp_key`, and `exempt_keys` must be identifiers
    /// - `timestamp_format` must be a valid strftime pattern
    /// - `template_globs` must compile
    /// - `max_tokens` must be positive and `temperature` within 0.0..=2.0
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> {
            Err(PromptcError::ConfigError(format!("validation failed: {}", msg)))
        };

        if self.template_dir.trim().is_empty() {
            return fail("template_dir must not be empty".to_string());
        }
        if self.default_template.trim().is_empty() {
            return fail("default_template must not be empty".to_string());
        }

        for (field, key) in [
            ("selector", &self.selector),
            ("timestamp_key", &self.timestamp_key),
        ] {
            if !is_identifier(key) {
                return fail(format!("{} '{}' is not a valid variable name", field, key));
            }
        }
        for key in &self.exempt_keys {
            if !is_identifier(key) {
                return fail(format!("exempt_keys entry '{}' is not a valid variable name", key));
            }
        }

        if !is_valid_timestamp_format(&self.timestamp_format) {
            return fail(format!(
                "timestamp_format '{}' is not a valid strftime pattern",
                self.timestamp_format
            ));
        }

        self.template_globset()?;

        if self.max_tokens == 0 {
            return fail("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return fail(format!(
                "temperature must be between 0.0 and 2.0 (found {})",
                self.temperature
            ));
        }

        Ok(())
    }

    /// Compile `template_globs` into a matcher.
    pub fn template_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.template_globs {
            let glob = Glob::new(pattern).map_err(|e| {
                PromptcError::ConfigError(format!(
                    "invalid glob pattern in template_globs: '{}' - {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| {
            PromptcError::ConfigError(format!("failed to build template_globs: {}", e))
        })
    }

    /// Resolve a template argument to a path.
    ///
    /// Paths that exist as given, are absolute, or contain a directory
    /// component are used as-is; bare names are looked up in `template_dir`.
    pub fn resolve_template_path(&self, name: &Path, base: &Path) -> PathBuf {
        let as_given = base.join(name);
        let has_dir = name.parent().is_some_and(|p| !p.as_os_str().is_empty());
        if name.is_absolute() || has_dir || as_given.exists() {
            return as_given;
        }
        self.template_dir_path(base).join(name)
    }

    /// Absolute template directory for a working directory.
    pub fn template_dir_path(&self, base: &Path) -> PathBuf {
        base.join(&self.template_dir)
    }

    /// Events log path, if logging is enabled.
    pub fn events_log_path(&self, base: &Path) -> Option<PathBuf> {
        self.events_log
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| base.join(p))
    }

    /// Compiler options described by this config.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            comment_marker: self.comment_marker.clone(),
            selector: self.selector.clone(),
            substitute_selector: self.substitute_selector,
            exempt_keys: self.exempt_keys.iter().cloned().collect(),
        }
    }

    /// A compiler built from this config.
    pub fn compiler(&self) -> Compiler {
        Compiler::new(self.compile_options())
    }
}
