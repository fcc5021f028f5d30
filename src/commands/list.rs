//! Implementation of the `promptc list` command.

use crate::cli::ListArgs;
use crate::context::CommandContext;
use crate::error::{PromptcError, Result};
use globset::GlobSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the `promptc list` command.
pub fn cmd_list(ctx: &CommandContext, args: ListArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => ctx.path(dir),
        None => ctx.config.template_dir_path(&ctx.base),
    };

    let globs = ctx.config.template_globset()?;
    let templates = find_templates(&dir, &globs)?;

    if templates.is_empty() {
        println!("No templates found in {}", dir.display());
        println!("Run `promptc init` to create the default template.");
        return Ok(());
    }

    println!("Templates in {}:", dir.display());
    for path in &templates {
        let marker = if path == Path::new(&ctx.config.default_template) {
            "  (default)"
        } else {
            ""
        };
        println!("  {}{}", path.display(), marker);
    }

    Ok(())
}

/// Files under `dir` whose relative path matches `globs`, sorted.
pub(super) fn find_templates(dir: &Path, globs: &GlobSet) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PromptcError::UserError(format!(
            "template directory '{}' does not exist",
            dir.display()
        )));
    }

    let mut found = Vec::new();
    collect(dir, dir, globs, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect(root: &Path, dir: &Path, globs: &GlobSet, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        PromptcError::UserError(format!("failed to read directory '{}': {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            PromptcError::UserError(format!("failed to read directory '{}': {}", dir.display(), e))
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect(root, &path, globs, found)?;
            continue;
        }

        // Temp files from interrupted atomic writes
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        if globs.is_match(&relative) {
            found.push(relative);
        }
    }

    Ok(())
}
