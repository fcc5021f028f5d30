//! One-level block parser over the token stream.
//!
//! Groups `if / else if / else / end` markers into [`Block`]s. Blocks do not
//! nest: the parser keeps no stack, and the first `[[end]]` after an `[[if]]`
//! closes it.
//!
//! Malformed input never fails. The policy is:
//!
//! - an `[[if]]` inside an open block is dropped
//! - `[[else if]]`, `[[else]]` and `[[end]]` outside a block are dropped
//! - an `[[if]]` with an unparseable condition is dropped
//! - an `[[if]]` with no matching `[[end]]` is dropped and everything after
//!   it is parsed as top-level content
//! - markers after a bare `[[else]]` in the same block are dropped; their text
//!   joins the `else` body

use super::lexer::{Condition, Token};

/// A top-level piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// Literal text.
    Text(&'a str),
    /// An unresolved placeholder, kept verbatim.
    Var {
        /// The variable name.
        name: &'a str,
        /// The marker text to emit.
        raw: &'a str,
    },
    /// A conditional block.
    Block(Block<'a>),
}

/// A content fragment inside a block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Literal text.
    Text(&'a str),
    /// An unresolved placeholder.
    Var(&'a str),
}

/// One `if` or `else if` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause<'a> {
    /// The arm's condition; `None` never matches.
    pub condition: Option<Condition<'a>>,
    /// Body content up to the next clause marker.
    pub body: Vec<Fragment<'a>>,
}

/// A complete `[[if]] ... [[end]]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// The `if` arm followed by any `else if` arms, in source order.
    pub clauses: Vec<Clause<'a>>,
    /// Body of the bare `else` arm, if present.
    pub fallback: Option<Vec<Fragment<'a>>>,
}

impl<'a> Block<'a> {
    /// The variable named by the opening `if`.
    pub fn variable(&self) -> Option<&'a str> {
        self.clauses
            .first()
            .and_then(|c| c.condition)
            .map(|c| c.variable)
    }
}

/// Parse a token stream into top-level nodes.
pub fn parse<'a>(tokens: &[Token<'a>]) -> Vec<Node<'a>> {
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Text(text) => nodes.push(Node::Text(text)),
            Token::VarRef { name, raw } => nodes.push(Node::Var { name, raw }),
            Token::If(Some(condition)) => {
                if let Some((block, next)) = parse_block(tokens, i + 1, condition) {
                    nodes.push(Node::Block(block));
                    i = next;
                    continue;
                }
            }
            // Stray or malformed markers
            Token::If(None) | Token::ElseIf(_) | Token::Else | Token::End => {}
        }
        i += 1;
    }

    nodes
}

/// Parse the body of a block starting just after its `[[if]]`.
///
/// Returns the block and the index after its `[[end]]`, or `None` if the
/// stream ends first.
fn parse_block<'a>(
    tokens: &[Token<'a>],
    start: usize,
    condition: Condition<'a>,
) -> Option<(Block<'a>, usize)> {
    let mut clauses = vec![Clause {
        condition: Some(condition),
        body: Vec::new(),
    }];
    let mut fallback: Option<Vec<Fragment<'a>>> = None;

    for (offset, token) in tokens[start..].iter().enumerate() {
        let fragment = match *token {
            Token::Text(text) => Fragment::Text(text),
            Token::VarRef { raw, .. } => Fragment::Var(raw),
            Token::ElseIf(condition) => {
                if fallback.is_none() {
                    clauses.push(Clause {
                        condition,
                        body: Vec::new(),
                    });
                }
                continue;
            }
            Token::Else => {
                if fallback.is_none() {
                    fallback = Some(Vec::new());
                }
                continue;
            }
            Token::End => {
                return Some((Block { clauses, fallback }, start + offset + 1));
            }
            // nested
            Token::If(_) => continue,
        };

        match fallback.as_mut() {
            Some(body) => body.push(fragment),
            None => {
                if let Some(clause) = clauses.last_mut() {
                    clause.body.push(fragment);
                }
            }
        }
    }

    None
}

/// Concatenate fragments into a string.
pub fn render_fragments(fragments: &[Fragment<'_>]) -> String {
    fragments
        .iter()
        .map(|f| match f {
            Fragment::Text(text) => *text,
            Fragment::Var(raw) => *raw,
        })
        .collect()
}
