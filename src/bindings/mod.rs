//! Variable bindings for template compilation.
//!
//! Bindings map variable names to [`Value`]s. They are built fresh for each
//! compilation from command-line assignments (`--var Key=Value`), bindings
//! files, and the injected timestamp.
//!
//! # Bindings files
//!
//! Each non-blank line holds one or more shell-quoted assignments; lines
//! starting with `#` are ignored:
//!
//! ```text
//! # essay settings
//! Category=Science
//! Topic="Quantum Computing" Audience='students aged 14-18'
//! ```

mod value;

#[cfg(test)]
mod tests;

pub use value::Value;

use crate::error::{PromptcError, Result};
use crate::template::is_identifier;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Named values supplied to a single compilation.
///
/// Keys are unique and iterate in sorted order, so compilation output never
/// depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Look up a bound value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether `key` is bound.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply a `Key=Value` assignment.
    pub fn apply_assignment(&mut self, raw: &str) -> Result<()> {
        let (key, value) = parse_assignment(raw)?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Merge every assignment from a bindings file.
    ///
    /// Later assignments override earlier ones, including those already bound.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptcError::UserError(format!(
                "failed to read bindings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        self.apply_file_content(&content).map_err(|e| {
            PromptcError::UserError(format!("in bindings file '{}': {}", path.display(), e))
        })
    }

    /// Merge every assignment from bindings-file text.
    pub fn apply_file_content(&mut self, content: &str) -> Result<()> {
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let words = shell_words::split(line).map_err(|e| {
                PromptcError::UserError(format!("line {}: {}", index + 1, e))
            })?;

            for word in words {
                self.apply_assignment(&word).map_err(|e| {
                    PromptcError::UserError(format!("line {}: {}", index + 1, e))
                })?;
            }
        }
        Ok(())
    }

    /// Bind `key` to `now` rendered with the strftime `format`.
    ///
    /// Returns `Ok(false)` without changing anything if `key` is already bound.
    pub fn inject_timestamp(
        &mut self,
        key: &str,
        format: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if self.contains_key(key) {
            return Ok(false);
        }
        let rendered = format_timestamp(now, format)?;
        self.insert(key, rendered);
        Ok(true)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a `Key=Value` assignment.
///
/// The key must be an identifier (`[A-Za-z_][A-Za-z0-9_]*`). Everything after
/// the first `=` is the value, which may be empty or contain further `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        PromptcError::UserError(format!(
            "invalid binding '{}': expected KEY=VALUE",
            raw
        ))
    })?;

    let key = key.trim();
    if !is_identifier(key) {
        return Err(PromptcError::UserError(format!(
            "invalid binding key '{}': use letters, digits, and underscores, not starting with a digit",
            key
        )));
    }

    Ok((key.to_string(), Value::from(value)))
}

/// Whether `format` is a strftime pattern chrono can render.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render `now` with a strftime pattern.
pub fn format_timestamp(now: DateTime<Utc>, format: &str) -> Result<String> {
    if !is_valid_timestamp_format(format) {
        return Err(PromptcError::UserError(format!(
            "invalid timestamp format '{}'",
            format
        )));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", now.format(format)).map_err(|_| {
        PromptcError::UserError(format!("failed to render timestamp with '{}'", format))
    })?;
    Ok(rendered)
}
