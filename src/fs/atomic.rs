//! Atomic file writes for generated artifacts.
//!
//! Content goes to `.{filename}.tmp` next to the target, is synced, and is
//! then renamed over the target. `std::fs::rename` replaces an existing
//! destination on every supported platform, so the target is either the old
//! file or the complete new one.

use crate::error::{PromptcError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What `write_unless_exists` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Created,
    /// The file existed and was replaced (`force`).
    Overwritten,
    /// The file existed and was left alone.
    Kept,
}

/// Atomically write a string to `path`, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PromptcError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PromptcError::UserError(format!("failed to replace '{}': {}", path.display(), e))
    })
}

/// Write `content` to `path` unless it already exists and `force` is false.
pub fn write_unless_exists(path: &Path, content: &str, force: bool) -> Result<WriteOutcome> {
    let existed = path.exists();
    if existed && !force {
        return Ok(WriteOutcome::Kept);
    }
    atomic_write_file(path, content)?;
    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    })
}

/// Temporary sibling path: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PromptcError::UserError(format!("invalid output path '{}'", target.display()))
        })?;
    let parent = target.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let result = File::create(path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });

    result.map_err(|e| {
        let _ = fs::remove_file(path);
        PromptcError::UserError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompt.txt");

        atomic_write_file(&path, "compiled prompt").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "compiled prompt");
    }

    #[test]
    fn test_replace_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompt.txt");
        fs::write(&path, "old").unwrap();

        atomic_write_file(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("nested").join("body.json");

        atomic_write_file(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_temp_file_is_gone_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompt.txt");

        atomic_write_file(&path, "x").unwrap();
        assert!(!temp_dir.path().join(".prompt.txt.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/out/prompt.txt")).unwrap();
        assert_eq!(temp, Path::new("/out/.prompt.txt.tmp"));
    }

    #[test]
    fn test_write_unless_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("essay_writer.txt");

        assert_eq!(
            write_unless_exists(&path, "first", false).unwrap(),
            WriteOutcome::Created
        );
        assert_eq!(
            write_unless_exists(&path, "second", false).unwrap(),
            WriteOutcome::Kept
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        assert_eq!(
            write_unless_exists(&path, "third", true).unwrap(),
            WriteOutcome::Overwritten
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "third");
    }

    #[test]
    fn test_unicode_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("emoji.txt");

        atomic_write_file(&path, "# 🎯 OBJECTIVE").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# 🎯 OBJECTIVE");
    }
}
