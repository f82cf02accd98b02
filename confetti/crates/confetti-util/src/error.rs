//! The error model.
//!
//! Parsing is strict: the first error wins and no partial tree is
//! returned. Every error carries a kind and the span of the offending
//! input. Each kind has exactly one canonical message; `render` produces
//! the one-line form (`error: <message>\n`) the conformance suite
//! compares byte-for-byte.

use std::fmt;

use thiserror::Error;

use crate::span::Span;

/// The reason a parse failed.
///
/// `IllegalCharacter` optionally names the offending code point: lexer
/// positions where the character itself is the diagnostic (bare
/// arguments, token scanning) attach it, while quoted and comment
/// contexts report the generic form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not valid UTF-8 (truncated, overlong, surrogate, or
    /// out-of-range sequence).
    MalformedUtf8,
    /// A forbidden character appeared in the input.
    IllegalCharacter(Option<char>),
    /// A backslash escaped a character that cannot be escaped.
    IllegalEscapeCharacter,
    /// A line continuation appeared where there is nothing to continue.
    UnexpectedLineContinuation,
    /// A backslash was cut short by the end of a quoted argument.
    IncompleteEscapeSequence,
    /// A quoted argument was never closed.
    UnclosedQuoted,
    /// A `;` appeared with no directive to terminate.
    UnexpectedSemicolon,
    /// A `{` appeared with no directive to attach to.
    UnexpectedOpenBrace,
    /// A `}` appeared with no open block.
    UnmatchedCloseBrace,
    /// The input ended with a block still open.
    ExpectedCloseBrace,
    /// Block nesting exceeded the configured `max_depth`.
    MaxDepthExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedUtf8 => f.write_str("malformed UTF-8"),
            ErrorKind::IllegalCharacter(None) => f.write_str("illegal character"),
            ErrorKind::IllegalCharacter(Some(c)) => {
                write!(f, "illegal character U+{:04X}", *c as u32)
            }
            ErrorKind::IllegalEscapeCharacter => f.write_str("illegal escape character"),
            ErrorKind::UnexpectedLineContinuation => f.write_str("unexpected line continuation"),
            ErrorKind::IncompleteEscapeSequence => f.write_str("incomplete escape sequence"),
            ErrorKind::UnclosedQuoted => f.write_str("unclosed quoted"),
            ErrorKind::UnexpectedSemicolon => f.write_str("unexpected ';'"),
            ErrorKind::UnexpectedOpenBrace => f.write_str("unexpected '{'"),
            ErrorKind::UnmatchedCloseBrace => f.write_str("found '}' without matching '{'"),
            ErrorKind::ExpectedCloseBrace => f.write_str("expected '}'"),
            ErrorKind::MaxDepthExceeded => f.write_str("maximum nesting depth exceeded"),
        }
    }
}

/// A parse failure: what went wrong and where.
///
/// # Example
///
/// ```
/// use confetti_util::{ErrorKind, ParseError, Span};
///
/// let err = ParseError::new(ErrorKind::UnclosedQuoted, Span::new(0, 1, 1, 1));
/// assert_eq!(err.to_string(), "unclosed quoted");
/// assert_eq!(err.render(), "error: unclosed quoted\n");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where in the input it went wrong.
    pub span: Span,
}

impl ParseError {
    /// Creates a new error.
    #[inline]
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The canonical single-line rendering: `error: <message>\n`.
    pub fn render(&self) -> String {
        format!("error: {self}\n")
    }
}

/// Result type alias used throughout the parser crates.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_canonical() {
        let cases: &[(ErrorKind, &str)] = &[
            (ErrorKind::MalformedUtf8, "malformed UTF-8"),
            (ErrorKind::IllegalCharacter(None), "illegal character"),
            (ErrorKind::IllegalEscapeCharacter, "illegal escape character"),
            (
                ErrorKind::UnexpectedLineContinuation,
                "unexpected line continuation",
            ),
            (
                ErrorKind::IncompleteEscapeSequence,
                "incomplete escape sequence",
            ),
            (ErrorKind::UnclosedQuoted, "unclosed quoted"),
            (ErrorKind::UnexpectedSemicolon, "unexpected ';'"),
            (ErrorKind::UnexpectedOpenBrace, "unexpected '{'"),
            (
                ErrorKind::UnmatchedCloseBrace,
                "found '}' without matching '{'",
            ),
            (ErrorKind::ExpectedCloseBrace, "expected '}'"),
            (ErrorKind::MaxDepthExceeded, "maximum nesting depth exceeded"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.to_string(), *expected);
        }
    }

    #[test]
    fn test_named_illegal_character_uses_uppercase_hex() {
        assert_eq!(
            ErrorKind::IllegalCharacter(Some('\u{1}')).to_string(),
            "illegal character U+0001"
        );
        assert_eq!(
            ErrorKind::IllegalCharacter(Some('\u{1A}')).to_string(),
            "illegal character U+001A"
        );
        // No padding beyond four digits.
        assert_eq!(
            ErrorKind::IllegalCharacter(Some('\u{EFFFF}')).to_string(),
            "illegal character U+EFFFF"
        );
    }

    #[test]
    fn test_render() {
        let err = ParseError::new(ErrorKind::UnexpectedSemicolon, Span::new(3, 4, 1, 4));
        assert_eq!(err.render(), "error: unexpected ';'\n");
        assert_eq!(err.span.start, 3);
    }
}
