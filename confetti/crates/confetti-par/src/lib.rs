//! confetti-par - The Confetti parser.
//!
//! Confetti is a small configuration language. A document is a list of
//! directives; each directive is one or more arguments followed by an
//! optional block of subdirectives:
//!
//! ```ebnf
//! document       = directive-list EOF ;
//! directive-list = [ directive { terminator directive } ] ;
//! directive      = argument { argument } [ block ] ;
//! block          = "{" directive-list "}" ;
//! terminator     = ";" | line-break ;
//! ```
//!
//! The parser drives the lexer one token at a time (no token list is
//! built) and is strict: the first error wins, no partial tree is
//! returned. Two rules fall outside the grammar sketch above:
//!
//! * A line break does not prevent a later `{` from attaching its block
//!   to the directive before it; a directive is only sealed by `;`, by
//!   its block closing, or by the next directive starting.
//! * A `;` must terminate a directive that is still collecting
//!   arguments on the current logical line; after a block, after
//!   another `;`, or after a line break it is an error.
//!
//! # Example
//!
//! ```
//! let document = confetti_par::parse(b"user alice { login a }").unwrap();
//! assert_eq!(document.directives.len(), 1);
//! assert_eq!(document.directives[0].arguments[1].value, "alice");
//! assert_eq!(document.directives[0].subdirectives.len(), 1);
//! ```

pub mod ast;
mod conformance;
mod edge_cases;
pub mod snapshot;

pub use ast::{Argument, Directive, Document};
pub use confetti_lex::{ArgumentKind, Comment, Options};
pub use confetti_util::{ErrorKind, ParseError, Result, Span};

use confetti_lex::{Lexer, TokenKind};

/// Parses a document with default options.
pub fn parse(source: &[u8]) -> Result<Document> {
    parse_with_options(source, &Options::new())
}

/// Parses a document with the given options.
pub fn parse_with_options(source: &[u8], options: &Options) -> Result<Document> {
    Parser::new(source, options).parse()
}

/// The recursive-descent parser over the streaming token source.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: &'a Options,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given input buffer.
    pub fn new(source: &'a [u8], options: &'a Options) -> Self {
        Self {
            lexer: Lexer::new(source, options),
            options,
        }
    }

    /// Parses the whole input into a document.
    pub fn parse(mut self) -> Result<Document> {
        let directives = self.parse_directives(0)?;
        Ok(Document {
            directives,
            comments: self.lexer.take_comments(),
        })
    }

    /// Parses a directive list until the end of the enclosing scope:
    /// the matching `}` at depth > 0, end of input at depth 0.
    fn parse_directives(&mut self, depth: u32) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        // Directive still under construction, if any.
        let mut current: Option<Directive> = None;
        // A line break ended the argument list of `current`; a block may
        // still attach, a new argument starts a fresh directive.
        let mut line_terminated = false;
        // `current` took its block; nothing further may attach to it.
        let mut sealed = false;
        loop {
            let token = self.lexer.next_token()?;
            let span = token.span;
            let kind = match token.kind {
                // A user punctuator is a standalone bare argument.
                TokenKind::Punctuator(value) => TokenKind::Argument {
                    value,
                    kind: ArgumentKind::Bare,
                },
                other => other,
            };
            match kind {
                TokenKind::Argument { value, kind } => {
                    let argument = Argument { value, kind, span };
                    match current.as_mut() {
                        Some(directive) if !line_terminated && !sealed => {
                            directive.arguments.push(argument);
                        }
                        _ => {
                            if let Some(done) = current.take() {
                                directives.push(done);
                            }
                            current = Some(Directive::new(argument));
                            line_terminated = false;
                            sealed = false;
                        }
                    }
                }
                TokenKind::Semicolon => {
                    match current.take() {
                        Some(done) if !line_terminated && !sealed => directives.push(done),
                        _ => {
                            return Err(ParseError::new(ErrorKind::UnexpectedSemicolon, span));
                        }
                    }
                    line_terminated = false;
                    sealed = false;
                }
                TokenKind::LineBreak => {
                    if sealed {
                        if let Some(done) = current.take() {
                            directives.push(done);
                        }
                        sealed = false;
                    } else if current.is_some() {
                        line_terminated = true;
                    }
                }
                TokenKind::BlockOpen => {
                    let Some(directive) = current.as_mut().filter(|_| !sealed) else {
                        return Err(ParseError::new(ErrorKind::UnexpectedOpenBrace, span));
                    };
                    if self.options.max_depth.is_some_and(|max| depth >= max) {
                        return Err(ParseError::new(ErrorKind::MaxDepthExceeded, span));
                    }
                    directive.subdirectives = self.parse_directives(depth + 1)?;
                    sealed = true;
                    line_terminated = false;
                }
                TokenKind::BlockClose => {
                    if depth == 0 {
                        return Err(ParseError::new(ErrorKind::UnmatchedCloseBrace, span));
                    }
                    if let Some(done) = current.take() {
                        directives.push(done);
                    }
                    return Ok(directives);
                }
                TokenKind::EndOfInput => {
                    if depth > 0 {
                        return Err(ParseError::new(ErrorKind::ExpectedCloseBrace, span));
                    }
                    if let Some(done) = current.take() {
                        directives.push(done);
                    }
                    return Ok(directives);
                }
                TokenKind::Punctuator(_) => unreachable!("Punctuator is remapped to Argument above"),
            }
        }
    }
}
