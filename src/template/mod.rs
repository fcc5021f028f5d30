//! Prompt template compiler.
//!
//! This module provides:
//!
//! - **Lexer**: single-pass tokenizer for `[[...]]` markers
//! - **Parser**: one-level `if / else if / else / end` block grouping
//! - **Compiler**: the comment / variable / conditional / cleanup pipeline
//! - **Source**: template loading and structural outlines
//!
//! # Template Syntax
//!
//! ```text
//! /// Comment lines start with three slashes and are removed.
//! Write about [[.Topic]].
//! [[if .Category == "History"]]
//! Focus on dates and causes.
//! [[else if .Category == "Science"]]
//! Focus on evidence and method.
//! [[else]]
//! Give a general overview.
//! [[end]]
//! ```

mod compiler;
mod lexer;
mod parser;
mod source;


pub use compiler::{
    Branch, BranchDecision, CompileOptions, CompileReport, Compiler, DEFAULT_COMMENT_MARKER,
    DEFAULT_SELECTOR, cleanup, strip_comments, unresolved_placeholders,
};
pub use source::{BlockOutline, Template, TemplateOutline};

pub(crate) use lexer::is_identifier;
