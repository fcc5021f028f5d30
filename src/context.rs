//! Working-directory context resolution for promptc.
//!
//! Every command runs against a [`CommandContext`]: the directory relative
//! paths resolve against, plus the configuration discovered for it. Commands
//! never read the process working directory themselves.

use crate::config::Config;
use crate::error::{PromptcError, Result};
use crate::template::Template;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved environment for a single command invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Directory that relative template, config, and output paths resolve against.
    pub base: PathBuf,

    /// Active configuration.
    pub config: Config,
}

impl CommandContext {
    /// Resolve the context from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(CommandContext)` - Successfully resolved context
    /// * `Err(PromptcError::UserError)` - The working directory is unavailable
    /// * `Err(PromptcError::ConfigError)` - The discovered config is invalid
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            PromptcError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd, config_path)
    }

    /// Resolve the context for a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(base: P, config_path: Option<&Path>) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let explicit = config_path.map(|p| base.join(p));
        let config = Config::discover(explicit.as_deref(), &base)?;
        Ok(Self { base, config })
    }

    /// Build a context from an already-loaded config.
    pub fn with_config<P: AsRef<Path>>(base: P, config: Config) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
            config,
        }
    }

    /// Resolve a path argument against the base directory.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.base.join(relative)
    }

    /// Resolve a template argument, falling back to `default_template`.
    pub fn template_path(&self, name: Option<&Path>) -> PathBuf {
        let name = name.unwrap_or_else(|| Path::new(&self.config.default_template));
        self.config.resolve_template_path(name, &self.base)
    }

    /// Load the template a command was pointed at.
    pub fn load_template(&self, name: Option<&Path>) -> Result<Template> {
        Template::load(self.template_path(name))
    }

    /// Events log location, if configured.
    pub fn events_log(&self) -> Option<PathBuf> {
        self.config.events_log_path(&self.base)
    }
}
