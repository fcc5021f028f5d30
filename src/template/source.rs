//! Loading templates from disk and summarizing their structure.

use super::compiler::strip_comments;
use super::lexer::{self, Token};
use super::parser::{self, Node};
use crate::error::{PromptcError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// An immutable template loaded from a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    content: String,
}

impl Template {
    /// Load a template from a file.
    ///
    /// # Returns
    ///
    /// * `Ok(Template)` - The file's contents
    /// * `Err(PromptcError::NotFound)` - The file does not exist
    /// * `Err(PromptcError::UserError)` - The file exists but could not be read
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(PromptcError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PromptcError::UserError(format!(
                "failed to read template '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Build a template from in-memory text.
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Where the template was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw template text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Summarize placeholders, blocks, and comments without compiling.
    pub fn outline(&self, comment_marker: &str) -> TemplateOutline {
        let comment_lines = if comment_marker.is_empty() {
            0
        } else {
            self.content
                .split('\n')
                .filter(|line| line.trim().starts_with(comment_marker))
                .count()
        };

        let body = strip_comments(&self.content, comment_marker);
        let tokens = lexer::tokenize(&body);

        let mut seen = BTreeSet::new();
        let placeholders = tokens
            .iter()
            .filter_map(|token| match *token {
                Token::VarRef { name, .. } => Some(name),
                _ => None,
            })
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect();

        let nodes = parser::parse(&tokens);
        let blocks = nodes
            .iter()
            .filter_map(|node| match node {
                Node::Block(block) => Some(BlockOutline {
                    variable: block.variable().unwrap_or_default().to_string(),
                    literals: block
                        .clauses
                        .iter()
                        .map(|c| c.condition.map(|c| c.literal.to_string()))
                        .collect(),
                    has_else: block.fallback.is_some(),
                }),
                _ => None,
            })
            .collect::<Vec<_>>();

        let markers = tokens.iter().filter(|t| t.is_marker()).count();
        let consumed: usize = blocks
            .iter()
            .map(|b: &BlockOutline| b.literals.len() + usize::from(b.has_else) + 1)
            .sum();

        TemplateOutline {
            comment_lines,
            placeholders,
            blocks,
            stray_markers: markers.saturating_sub(consumed),
        }
    }
}

/// Structural summary of a template, as shown by `promptc inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateOutline {
    /// Number of comment lines that compilation removes.
    pub comment_lines: usize,
    /// Distinct placeholder names, in order of first appearance.
    pub placeholders: Vec<String>,
    /// Well-formed conditional blocks, in source order.
    pub blocks: Vec<BlockOutline>,
    /// Conditional markers that belong to no block and will be dropped.
    pub stray_markers: usize,
}

/// Summary of one conditional block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutline {
    /// Variable named by the opening `if`.
    pub variable: String,
    /// Literal of each `if`/`else if` arm; `None` for unparseable conditions.
    pub literals: Vec<Option<String>>,
    /// Whether the block has a bare `else`.
    pub has_else: bool,
}
