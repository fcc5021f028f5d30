//! Single-pass tokenizer for `[[...]]` markers.
//!
//! The lexer walks the input once, splitting it into plain text and the
//! markers the compiler understands:
//!
//! - `[[.Name]]` - variable reference
//! - `[[if .Name == "Literal"]]` / `[[if eq .Name "Literal"]]` - block open
//! - `[[else if ...]]` - alternative clause
//! - `[[else]]` - fallback clause
//! - `[[end]]` - block close
//!
//! Any other `[[...]]` sequence is plain text. Conditional markers whose
//! condition cannot be parsed are still emitted (with `condition: None`) so
//! later stages can strip them instead of leaking them into the output.

/// A condition comparing a bound variable to a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    /// Name of the variable (without the leading `.`).
    pub variable: &'a str,
    /// The literal the variable's value must equal.
    pub literal: &'a str,
}

/// A lexical token borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text between markers.
    Text(&'a str),
    /// A `[[.Name]]` placeholder.
    VarRef {
        /// The variable name.
        name: &'a str,
        /// The full marker text, including brackets.
        raw: &'a str,
    },
    /// An `[[if ...]]` marker.
    If(Option<Condition<'a>>),
    /// An `[[else if ...]]` marker, or any other `[[else...]]` variant.
    ElseIf(Option<Condition<'a>>),
    /// A bare `[[else]]` marker.
    Else,
    /// An `[[end]]` marker.
    End,
}

impl Token<'_> {
    /// Whether this token is a conditional marker (if/else/end family).
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Token::If(_) | Token::ElseIf(_) | Token::Else | Token::End
        )
    }
}

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// Tokenize the input into text, placeholders, and conditional markers.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(rel) = input[pos..].find(OPEN) {
        let open = pos + rel;
        let inner_start = open + OPEN.len();
        let Some(close_rel) = input[inner_start..].find(CLOSE) else {
            break;
        };
        let close = inner_start + close_rel;
        let end = close + CLOSE.len();

        // A marker never spans another opener; `[[if possible ... [[end]]`
        // leaves the first `[[` as text.
        if let Some(nested) = input[inner_start..close].find(OPEN) {
            pos = inner_start + nested;
            continue;
        }

        match classify(&input[inner_start..close], &input[open..end]) {
            Some(token) => {
                if text_start < open {
                    tokens.push(Token::Text(&input[text_start..open]));
                }
                tokens.push(token);
                pos = end;
                text_start = end;
            }
            // Not a marker; rescan from the next byte so `[[[.X]]` still
            // finds the placeholder. `[` is ASCII, so `open + 1` is a char boundary.
            None => pos = open + 1,
        }
    }

    if text_start < input.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }

    tokens
}

/// Classify the contents of a `[[...]]` marker.
fn classify<'a>(inner: &'a str, raw: &'a str) -> Option<Token<'a>> {
    if let Some(name) = inner.strip_prefix('.') {
        return is_identifier(name).then_some(Token::VarRef { name, raw });
    }

    let trimmed = inner.trim();

    if trimmed == "end" {
        return Some(Token::End);
    }

    if let Some(rest) = trimmed.strip_prefix("else") {
        if rest.is_empty() {
            return Some(Token::Else);
        }
        let condition = keyword_tail(rest.trim_start(), "if").and_then(parse_condition);
        return Some(Token::ElseIf(condition));
    }

    if trimmed.starts_with("if") {
        return Some(Token::If(keyword_tail(trimmed, "if").and_then(parse_condition)));
    }

    None
}

/// Strip `keyword` from the start of `s` when it is followed by whitespace.
fn keyword_tail<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// Parse `.Name == "Literal"` or `eq .Name "Literal"`.
pub(crate) fn parse_condition(s: &str) -> Option<Condition<'_>> {
    let s = s.trim();

    if let Some(rest) = keyword_tail(s, "eq") {
        let rest = rest.strip_prefix('.')?;
        let split = rest.find(char::is_whitespace)?;
        let (variable, literal) = rest.split_at(split);
        return build_condition(variable, literal);
    }

    let rest = s.strip_prefix('.')?;
    let (variable, literal) = rest.split_once("==")?;
    build_condition(variable.trim_end(), literal)
}

fn build_condition<'a>(variable: &'a str, literal: &'a str) -> Option<Condition<'a>> {
    if !is_identifier(variable) {
        return None;
    }
    let literal = literal
        .trim()
        .strip_prefix('"')?
        .strip_suffix('"')?;
    if literal.contains('"') {
        return None;
    }
    Some(Condition { variable, literal })
}

/// Placeholder names are ASCII identifiers: letters, digits, underscores.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond<'a>(variable: &'a str, literal: &'a str) -> Option<Condition<'a>> {
        Some(Condition { variable, literal })
    }

    #[test]
    fn test_plain_text_is_single_token() {
        assert_eq!(tokenize("just text"), vec![Token::Text("just text")]);
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_variable_reference() {
        let tokens = tokenize("Topic: [[.Topic]]!");
        assert_eq!(
            tokens,
            vec![
                Token::Text("Topic: "),
                Token::VarRef {
                    name: "Topic",
                    raw: "[[.Topic]]"
                },
                Token::Text("!"),
            ]
        );
    }

    #[test]
    fn test_full_conditional_sequence() {
        let tokens = tokenize(
            r#"[[if .Category == "A"]]a[[else if .Category == "B"]]b[[else]]c[[end]]"#,
        );
        assert_eq!(
            tokens,
            vec![
                Token::If(cond("Category", "A")),
                Token::Text("a"),
                Token::ElseIf(cond("Category", "B")),
                Token::Text("b"),
                Token::Else,
                Token::Text("c"),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_eq_condition_form() {
        let tokens = tokenize(r#"[[if eq .Category "History"]]x[[end]]"#);
        assert_eq!(tokens[0], Token::If(cond("Category", "History")));
    }

    #[test]
    fn test_malformed_conditions_are_still_markers() {
        let tokens = tokenize("[[if Category]][[else whatever]][[iffy]]");
        assert_eq!(
            tokens,
            vec![Token::If(None), Token::ElseIf(None), Token::If(None)]
        );
    }

    #[test]
    fn test_unknown_markers_are_text() {
        let tokens = tokenize("[[note]] and [[. bad]] and [[endless]]");
        assert_eq!(
            tokens,
            vec![Token::Text("[[note]] and [[. bad]] and [[endless]]")]
        );
    }

    #[test]
    fn test_unclosed_marker_is_text() {
        let tokens = tokenize("before [[.Topic");
        assert_eq!(tokens, vec![Token::Text("before [[.Topic")]);
    }

    #[test]
    fn test_marker_does_not_span_another_opener() {
        let tokens = tokenize("a [[if maybe\nb [[if .C == \"A\"]]x[[end]]");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a [[if maybe\nb "),
                Token::If(Some(Condition {
                    variable: "C",
                    literal: "A"
                })),
                Token::Text("x"),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_extra_bracket_before_placeholder() {
        let tokens = tokenize("[[[.X]]");
        assert_eq!(
            tokens,
            vec![
                Token::Text("["),
                Token::VarRef {
                    name: "X",
                    raw: "[[.X]]"
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_inside_keywords() {
        let tokens = tokenize(r#"[[ else  if  .K ==  "v" ]][[ end ]]"#);
        assert_eq!(tokens, vec![Token::ElseIf(cond("K", "v")), Token::End]);
    }

    #[test]
    fn test_literal_may_be_empty() {
        assert_eq!(parse_condition(r#".K == """#), cond("K", ""));
    }

    #[test]
    fn test_literal_with_spaces_and_unicode() {
        assert_eq!(
            parse_condition(r#".Category == "Art & Design 🎨""#),
            cond("Category", "Art & Design 🎨")
        );
    }

    #[test]
    fn test_rejects_unquoted_literal() {
        assert_eq!(parse_condition(".K == value"), None);
        assert_eq!(parse_condition(r#"K == "v""#), None);
        assert_eq!(parse_condition(r#".K = "v""#), None);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Topic"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("has-dash"));
        assert!(!is_identifier("has space"));
    }

    #[test]
    fn test_is_marker() {
        assert!(Token::End.is_marker());
        assert!(Token::If(None).is_marker());
        assert!(!Token::Text("x").is_marker());
    }
}
