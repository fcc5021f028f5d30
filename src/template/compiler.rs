//! The four-stage template compilation pipeline.
//!
//! 1. **Comments** - lines whose trimmed content starts with the comment
//!    marker (`///`) are removed.
//! 2. **Variables** - every `[[.Key]]` whose key is bound and not exempt is
//!    replaced with the bound value.
//! 3. **Conditionals** - `[[if]] ... [[end]]` blocks are resolved against the
//!    bindings, one level deep, left to right.
//! 4. **Cleanup** - leftover conditional markers are removed, runs of blank
//!    lines are collapsed, and the result is trimmed.
//!
//! Compilation never fails and has no side effects.

use super::lexer::{self, Condition, Token};
use super::parser::{self, Block, Node};
use crate::bindings::Bindings;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Default marker that starts a comment line.
pub const DEFAULT_COMMENT_MARKER: &str = "///";

/// Default name of the selector binding.
pub const DEFAULT_SELECTOR: &str = "Category";

/// Three or more consecutive newlines (two or more blank lines).
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex is valid"));

/// Marker prefixes that must never survive cleanup.
const RESIDUAL_MARKERS: [&str; 3] = ["[[if", "[[else", "[[end]]"];

/// Options controlling compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Lines starting with this marker (after trimming) are dropped.
    pub comment_marker: String,
    /// The reserved binding that drives conditional selection.
    pub selector: String,
    /// Whether stage 2 also substitutes `[[.Selector]]` placeholders.
    pub substitute_selector: bool,
    /// Keys that stage 2 never substitutes.
    pub exempt_keys: BTreeSet<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            substitute_selector: false,
            exempt_keys: BTreeSet::new(),
        }
    }
}

/// Which arm of a conditional block produced its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Branch {
    /// An `if` (index 0) or `else if` arm matched.
    Clause {
        /// Position of the arm within the block.
        index: usize,
        /// The literal that matched.
        literal: String,
    },
    /// No arm matched; the bare `else` body was used.
    Else,
    /// No arm matched and there was no `else`; the block emitted nothing.
    Empty,
}

/// The outcome of resolving one conditional block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchDecision {
    /// Variable named by the block's opening `if`.
    pub variable: String,
    /// That variable's bound value, if any.
    pub value: Option<String>,
    /// The arm that was taken.
    pub branch: Branch,
}

/// A compiled prompt together with introspection data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    /// The compiled prompt.
    pub output: String,
    /// Placeholder names left in the output, in order of first appearance.
    pub unresolved: Vec<String>,
    /// One decision per conditional block, in source order.
    pub branches: Vec<BranchDecision>,
}

impl CompileReport {
    /// Whether every placeholder in the output was resolved.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Compiles template text against a set of bindings.
///
/// A `Compiler` holds only its options, so a single instance can be reused
/// (and shared) across any number of compilations.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a compiler with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// The options this compiler was built with.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Use a different selector key.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.options.selector = selector.into();
        self
    }

    /// Exempt an additional key from substitution.
    pub fn with_exempt_key(mut self, key: impl Into<String>) -> Self {
        self.options.exempt_keys.insert(key.into());
        self
    }

    /// Substitute every bound key, including the selector and exempt keys.
    pub fn substituting_all(mut self) -> Self {
        self.options.substitute_selector = true;
        self.options.exempt_keys.clear();
        self
    }

    /// Compile a template into the final prompt string.
    pub fn compile(&self, template: &str, bindings: &Bindings) -> String {
        self.compile_with_report(template, bindings).output
    }

    /// Compile a template and report branch decisions and unresolved placeholders.
    pub fn compile_with_report(&self, template: &str, bindings: &Bindings) -> CompileReport {
        let text = normalize_line_endings(template);
        let text = strip_comments(&text, &self.options.comment_marker);
        let text = self.substitute(&text, bindings);
        let (text, branches) = resolve_conditionals(&text, bindings);
        let output = cleanup(&text);
        let unresolved = unresolved_placeholders(&output);

        CompileReport {
            output,
            unresolved,
            branches,
        }
    }

    /// Whether stage 2 skips `key`.
    pub fn is_exempt(&self, key: &str) -> bool {
        (key == self.options.selector && !self.options.substitute_selector)
            || self.options.exempt_keys.contains(key)
    }

    /// Stage 2: replace `[[.Key]]` for every bound, non-exempt key.
    fn substitute(&self, text: &str, bindings: &Bindings) -> String {
        let mut out = text.to_string();
        for (key, value) in bindings.iter() {
            if self.is_exempt(key) {
                continue;
            }
            let placeholder = format!("[[.{}]]", key);
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, &value.to_string());
            }
        }
        out
    }
}

/// Convert CRLF line endings to LF so blank-line collapse sees every run.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Stage 1: drop every line whose trimmed content starts with `marker`.
///
/// An empty marker disables comment stripping.
pub fn strip_comments(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .filter(|line| !line.trim().starts_with(marker))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 3: resolve every conditional block against `bindings`.
fn resolve_conditionals(text: &str, bindings: &Bindings) -> (String, Vec<BranchDecision>) {
    let tokens = lexer::tokenize(text);
    let nodes = parser::parse(&tokens);

    let mut out = String::with_capacity(text.len());
    let mut decisions = Vec::new();

    for node in &nodes {
        match node {
            Node::Text(content) => out.push_str(content),
            Node::Var { raw, .. } => out.push_str(raw),
            Node::Block(block) => {
                let (body, decision) = resolve_block(block, bindings);
                out.push_str(body.trim());
                decisions.push(decision);
            }
        }
    }

    (out, decisions)
}

fn resolve_block(block: &Block<'_>, bindings: &Bindings) -> (String, BranchDecision) {
    let variable = block.variable().unwrap_or_default();
    let value = bindings.get(variable).map(|v| v.to_string());

    let matched = block.clauses.iter().enumerate().find_map(|(index, clause)| {
        clause
            .condition
            .filter(|c| condition_holds(c, bindings))
            .map(|c| (index, c.literal, &clause.body))
    });

    let (body, branch) = match (matched, &block.fallback) {
        (Some((index, literal, body)), _) => (
            parser::render_fragments(body),
            Branch::Clause {
                index,
                literal: literal.to_string(),
            },
        ),
        (None, Some(fallback)) => (parser::render_fragments(fallback), Branch::Else),
        (None, None) => (String::new(), Branch::Empty),
    };

    let decision = BranchDecision {
        variable: variable.to_string(),
        value,
        branch,
    };
    (body, decision)
}

/// An unbound variable never satisfies a condition.
fn condition_holds(condition: &Condition<'_>, bindings: &Bindings) -> bool {
    bindings
        .get(condition.variable)
        .is_some_and(|value| value.to_string() == condition.literal)
}

/// Stage 4: strip leftover markers, collapse blank lines, and trim.
pub fn cleanup(text: &str) -> String {
    let mut text = text.to_string();

    // Dropping one marker can join text into a new one, so repeat until stable.
    loop {
        let rebuilt: String = {
            let tokens = lexer::tokenize(&text);
            if !tokens.iter().any(Token::is_marker) {
                break;
            }
            tokens
                .iter()
                .filter_map(|token| match *token {
                    Token::Text(content) => Some(content),
                    Token::VarRef { raw, .. } => Some(raw),
                    _ => None,
                })
                .collect()
        };
        text = rebuilt;
    }

    // Unterminated openers such as `[[if .X` have no closing brackets to
    // form a token.
    while let Some(marker) = RESIDUAL_MARKERS.iter().find(|m| text.contains(**m)) {
        text = text.replace(marker, "");
    }

    BLANK_RUN.replace_all(&text, "\n\n").trim().to_string()
}

/// Placeholder names still present in `text`, deduplicated in order.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    lexer::tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::VarRef { name, .. } => Some(name),
            _ => None,
        })
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
