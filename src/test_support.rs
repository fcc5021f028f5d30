//! Shared fixtures for command tests.

use crate::config::Config;
use crate::context::CommandContext;
use std::fs;
use tempfile::TempDir;

/// A temporary working directory with the default template directory.
pub(crate) struct TestWorkspace {
    pub(crate) dir: TempDir,
    pub(crate) ctx: CommandContext,
}

impl TestWorkspace {
    /// Empty workspace using the default config.
    pub(crate) fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Empty workspace using `config`.
    pub(crate) fn with_config(config: Config) -> Self {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::with_config(dir.path(), config);
        Self { dir, ctx }
    }

    /// Write a template into the configured template directory.
    pub(crate) fn write_template(&self, name: &str, content: &str) {
        let template_dir = self.ctx.config.template_dir_path(self.dir.path());
        fs::create_dir_all(&template_dir).unwrap();
        fs::write(template_dir.join(name), content).unwrap();
    }

    /// Read a file relative to the workspace root.
    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}
