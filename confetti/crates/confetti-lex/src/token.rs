//! Token and comment types emitted by the lexer.

use confetti_util::Span;

/// How an argument was written in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Unquoted.
    Bare,
    /// Surrounded by a single pair of double quotes.
    Quoted,
    /// Surrounded by triple double quotes; may span lines.
    Triple,
}

/// What a token is.
///
/// Argument values are fully decoded: surrounding quotes are stripped
/// and escape sequences and line continuations are resolved, so the
/// text owns its own storage rather than borrowing from the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A decoded argument.
    Argument { value: String, kind: ArgumentKind },
    /// A user-configured punctuator matched by the punctuator
    /// extension; the parser treats it as a standalone bare argument.
    Punctuator(String),
    /// `{`
    BlockOpen,
    /// `}`
    BlockClose,
    /// `;`
    Semicolon,
    /// One of the eight line terminators (CRLF counts once).
    LineBreak,
    /// End of input.
    EndOfInput,
}

/// A token with its source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A comment captured by the lexer when comment capture is enabled.
///
/// The text excludes the leading `#` or `//`; a line-continuation
/// escape at the end of a comment line is elided, like continuations
/// in arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}
