//! The Confetti lexer.
//!
//! The lexer is driven by the parser one token at a time; it shares a
//! single cursor with no token buffering. Arguments are decoded on the
//! fly into fresh buffers (escape processing rewrites content, so
//! argument text never borrows from the input). Comments are discarded
//! unless comment capture is enabled, in which case they accumulate in
//! source order and can be taken after the last token.
//!
//! Dispatch order at a token boundary: line breaks, whitespace,
//! comments, built-in punctuation (`{` `}` `;`), quotes, expression
//! arguments, user punctuators (longest match), line continuations,
//! then bare arguments. A `\` followed by a line terminator at a token
//! boundary is a line continuation and glues the next line onto the
//! current logical line; the same pair inside an argument is an error.

use confetti_util::{ErrorKind, ParseError, Result, Span};

use crate::cursor::Cursor;
use crate::options::Options;
use crate::token::{ArgumentKind, Comment, Token, TokenKind};
use crate::unicode::{is_forbidden, is_inline_whitespace, is_line_break};

/// A saved cursor position used to build token spans.
#[derive(Clone, Copy)]
struct Mark {
    position: usize,
    line: u32,
    column: u32,
}

/// The streaming lexer.
///
/// # Example
///
/// ```
/// use confetti_lex::{Lexer, Options, TokenKind};
///
/// let options = Options::new();
/// let mut lexer = Lexer::new(b"probe eth0", &options);
/// let token = lexer.next_token().unwrap();
/// assert!(matches!(token.kind, TokenKind::Argument { .. }));
/// ```
pub struct Lexer<'a> {
    /// Position state and UTF-8 decoding.
    cursor: Cursor<'a>,

    /// Active option set.
    options: &'a Options,

    /// Comments captured so far, in source order.
    comments: Vec<Comment>,

    /// True once the current logical line has produced a token. Line
    /// continuations are only legal on lines that already carry one.
    line_has_tokens: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given input buffer.
    pub fn new(source: &'a [u8], options: &'a Options) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
            comments: Vec::new(),
            line_has_tokens: false,
        }
    }

    /// Returns the next token.
    ///
    /// After `EndOfInput` has been returned once, every further call
    /// returns it again.
    pub fn next_token(&mut self) -> Result<Token> {
        let token = self.scan_token()?;
        match token.kind {
            TokenKind::LineBreak => self.line_has_tokens = false,
            TokenKind::EndOfInput => {}
            _ => self.line_has_tokens = true,
        }
        Ok(token)
    }

    /// Takes the comments captured so far. Empty unless
    /// `capture_comments` is set.
    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    fn scan_token(&mut self) -> Result<Token> {
        loop {
            if self.at_input_end() {
                let span = Span::point(
                    self.cursor.position(),
                    self.cursor.line(),
                    self.cursor.column(),
                );
                return Ok(Token::new(TokenKind::EndOfInput, span));
            }
            let Some(c) = self.cursor.peek()? else {
                continue;
            };
            if is_line_break(c) {
                let start = self.here();
                self.consume_line_break()?;
                return Ok(Token::new(TokenKind::LineBreak, self.span_from(start)));
            }
            if is_inline_whitespace(c) {
                self.cursor.bump()?;
                continue;
            }
            match c {
                '{' => return self.single_char_token(TokenKind::BlockOpen),
                '}' => return self.single_char_token(TokenKind::BlockClose),
                ';' => return self.single_char_token(TokenKind::Semicolon),
                '"' => return self.lex_quoted(),
                '#' => {
                    self.lex_comment()?;
                    continue;
                }
                '/' if self.options.c_style_comments && self.cursor.rest().starts_with(b"//") => {
                    self.lex_comment()?;
                    continue;
                }
                '(' if self.options.expression_arguments => return self.lex_expression(),
                '\\' => {
                    match self.cursor.peek_second()? {
                        None => return Err(self.char_error(ErrorKind::IllegalEscapeCharacter, c)),
                        Some(next) if is_line_break(next) => {
                            if !self.line_has_tokens {
                                return Err(self
                                    .char_error(ErrorKind::UnexpectedLineContinuation, c));
                            }
                            self.cursor.bump()?;
                            self.consume_line_break()?;
                            continue;
                        }
                        Some(_) => return self.lex_bare(),
                    }
                }
                _ => {}
            }
            if let Some(punctuator) = self.match_punctuator() {
                let start = self.here();
                for _ in punctuator.chars() {
                    self.cursor.bump()?;
                }
                return Ok(Token::new(
                    TokenKind::Punctuator(punctuator.to_string()),
                    self.span_from(start),
                ));
            }
            if is_forbidden(c) {
                return Err(self.char_error(ErrorKind::IllegalCharacter(Some(c)), c));
            }
            return self.lex_bare();
        }
    }

    /// Scans a bare argument. The first code point is an argument
    /// character or a backslash whose escape target is not a line
    /// terminator.
    fn lex_bare(&mut self) -> Result<Token> {
        let start = self.here();
        let mut value = String::new();
        loop {
            if self.at_input_end() {
                break;
            }
            let Some(c) = self.cursor.peek()? else {
                break;
            };
            if is_line_break(c) || is_inline_whitespace(c) {
                break;
            }
            match c {
                '{' | '}' | ';' | '"' | '#' => break,
                '/' if self.options.c_style_comments && self.cursor.rest().starts_with(b"//") => {
                    break
                }
                '(' if self.options.expression_arguments => break,
                '\\' => {
                    let escape_start = self.here();
                    self.cursor.bump()?;
                    if self.at_input_end() {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    }
                    let Some(target) = self.cursor.peek()? else {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    };
                    // Line terminators cannot be escaped inside an
                    // argument; continuations only exist between them.
                    if is_line_break(target)
                        || is_inline_whitespace(target)
                        || is_forbidden(target)
                    {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    }
                    value.push(target);
                    self.cursor.bump()?;
                }
                _ => {
                    if self.match_punctuator().is_some() {
                        break;
                    }
                    if is_forbidden(c) {
                        return Err(self.char_error(ErrorKind::IllegalCharacter(Some(c)), c));
                    }
                    value.push(c);
                    self.cursor.bump()?;
                }
            }
        }
        Ok(Token::new(
            TokenKind::Argument {
                value,
                kind: ArgumentKind::Bare,
            },
            self.span_from(start),
        ))
    }

    /// Scans a quoted argument, dispatching to the triple-quoted form
    /// when the opening quote is followed by two more.
    fn lex_quoted(&mut self) -> Result<Token> {
        let start = self.here();
        self.cursor.bump()?;
        if self.cursor.rest().starts_with(b"\"\"") {
            self.cursor.bump()?;
            self.cursor.bump()?;
            return self.lex_triple(start);
        }
        let mut value = String::new();
        loop {
            if self.at_input_end() {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            }
            let Some(c) = self.cursor.peek()? else {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            };
            match c {
                '"' => {
                    self.cursor.bump()?;
                    return Ok(Token::new(
                        TokenKind::Argument {
                            value,
                            kind: ArgumentKind::Quoted,
                        },
                        self.span_from(start),
                    ));
                }
                '\\' => {
                    let escape_start = self.here();
                    self.cursor.bump()?;
                    if self.at_input_end() {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    }
                    let Some(target) = self.cursor.peek()? else {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    };
                    if is_line_break(target) {
                        // Continuation: elided from the decoded value.
                        self.consume_line_break()?;
                    } else if is_inline_whitespace(target) || is_forbidden(target) {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    } else {
                        value.push(target);
                        self.cursor.bump()?;
                    }
                }
                c if is_line_break(c) => {
                    return Err(ParseError::new(
                        ErrorKind::UnclosedQuoted,
                        self.span_from(start),
                    ));
                }
                c if is_forbidden(c) => {
                    return Err(self.char_error(ErrorKind::IllegalCharacter(None), c));
                }
                _ => {
                    value.push(c);
                    self.cursor.bump()?;
                }
            }
        }
    }

    /// Scans a triple-quoted argument; the opening `"""` has been
    /// consumed. Raw line terminators are preserved byte for byte, and
    /// a line continuation is not available in this mode.
    fn lex_triple(&mut self, start: Mark) -> Result<Token> {
        let mut value = String::new();
        loop {
            if self.at_input_end() {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            }
            if self.cursor.rest().starts_with(b"\"\"\"") {
                self.cursor.bump()?;
                self.cursor.bump()?;
                self.cursor.bump()?;
                return Ok(Token::new(
                    TokenKind::Argument {
                        value,
                        kind: ArgumentKind::Triple,
                    },
                    self.span_from(start),
                ));
            }
            let Some(c) = self.cursor.peek()? else {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            };
            match c {
                '\\' => {
                    let escape_start = self.here();
                    self.cursor.bump()?;
                    if self.at_input_end() {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    }
                    let Some(target) = self.cursor.peek()? else {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    };
                    if is_line_break(target) {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    }
                    if is_inline_whitespace(target) || is_forbidden(target) {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    }
                    value.push(target);
                    self.cursor.bump()?;
                }
                c if is_line_break(c) => {
                    value.push(c);
                    self.cursor.bump()?;
                    if c == '\r' && self.cursor.rest().starts_with(b"\n") {
                        value.push('\n');
                        self.cursor.bump()?;
                    }
                }
                c if is_forbidden(c) => {
                    return Err(self.char_error(ErrorKind::IllegalCharacter(None), c));
                }
                _ => {
                    value.push(c);
                    self.cursor.bump()?;
                }
            }
        }
    }

    /// Scans a `#` or `//` comment up to (not including) the next line
    /// terminator. A `\` immediately before the terminator consumes it
    /// and the comment continues on the next line.
    fn lex_comment(&mut self) -> Result<()> {
        let start = self.here();
        let Some(first) = self.cursor.bump()? else {
            return Ok(());
        };
        if first == '/' {
            self.cursor.bump()?;
        }
        let mut text = if self.options.capture_comments {
            Some(String::new())
        } else {
            None
        };
        loop {
            if self.at_input_end() {
                break;
            }
            let Some(c) = self.cursor.peek()? else {
                break;
            };
            if is_line_break(c) {
                break;
            }
            if c == '\\' {
                if let Some(next) = self.cursor.peek_second()? {
                    if is_line_break(next) {
                        self.cursor.bump()?;
                        self.consume_line_break()?;
                        continue;
                    }
                }
                if let Some(buffer) = text.as_mut() {
                    buffer.push('\\');
                }
                self.cursor.bump()?;
                continue;
            }
            if is_forbidden(c) {
                return Err(self.char_error(ErrorKind::IllegalCharacter(None), c));
            }
            if let Some(buffer) = text.as_mut() {
                buffer.push(c);
            }
            self.cursor.bump()?;
        }
        if let Some(text) = text {
            self.comments.push(Comment {
                text,
                span: self.span_from(start),
            });
        }
        Ok(())
    }

    /// Scans a `( … )` expression argument: the balanced span becomes a
    /// single bare argument holding the inner text verbatim. A
    /// backslash keeps the following character from counting toward
    /// paren balance; both stay in the text.
    fn lex_expression(&mut self) -> Result<Token> {
        let start = self.here();
        self.cursor.bump()?;
        let mut depth: u32 = 1;
        let mut value = String::new();
        loop {
            if self.at_input_end() {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            }
            let Some(c) = self.cursor.peek()? else {
                return Err(ParseError::new(
                    ErrorKind::UnclosedQuoted,
                    self.span_from(start),
                ));
            };
            match c {
                '(' => {
                    depth += 1;
                    value.push('(');
                    self.cursor.bump()?;
                }
                ')' => {
                    self.cursor.bump()?;
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Token::new(
                            TokenKind::Argument {
                                value,
                                kind: ArgumentKind::Bare,
                            },
                            self.span_from(start),
                        ));
                    }
                    value.push(')');
                }
                '\\' => {
                    let escape_start = self.here();
                    self.cursor.bump()?;
                    if self.at_input_end() {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    }
                    let Some(target) = self.cursor.peek()? else {
                        return Err(ParseError::new(
                            ErrorKind::IncompleteEscapeSequence,
                            self.span_from(escape_start),
                        ));
                    };
                    if is_forbidden(target) {
                        return Err(ParseError::new(
                            ErrorKind::IllegalEscapeCharacter,
                            self.span_from(escape_start),
                        ));
                    }
                    value.push('\\');
                    if is_line_break(target) {
                        value.push(target);
                        self.cursor.bump()?;
                        if target == '\r' && self.cursor.rest().starts_with(b"\n") {
                            value.push('\n');
                            self.cursor.bump()?;
                        }
                    } else {
                        value.push(target);
                        self.cursor.bump()?;
                    }
                }
                c if is_line_break(c) => {
                    value.push(c);
                    self.cursor.bump()?;
                    if c == '\r' && self.cursor.rest().starts_with(b"\n") {
                        value.push('\n');
                        self.cursor.bump()?;
                    }
                }
                c if is_forbidden(c) => {
                    return Err(self.char_error(ErrorKind::IllegalCharacter(Some(c)), c));
                }
                _ => {
                    value.push(c);
                    self.cursor.bump()?;
                }
            }
        }
    }

    /// Longest user punctuator matching at the current position, if any.
    fn match_punctuator(&self) -> Option<&'a str> {
        let punctuators: &'a [String] = &self.options.punctuators;
        let rest = self.cursor.rest();
        let mut best: Option<&'a str> = None;
        for p in punctuators {
            if !p.is_empty()
                && rest.starts_with(p.as_bytes())
                && best.map_or(true, |b| p.len() > b.len())
            {
                best = Some(p.as_str());
            }
        }
        best
    }

    /// True at the end of input. A single U+001A as the final code
    /// point also ends input cleanly.
    fn at_input_end(&self) -> bool {
        let rest = self.cursor.rest();
        rest.is_empty() || rest == b"\x1A"
    }

    /// Consumes one line terminator, treating CRLF as a single break.
    fn consume_line_break(&mut self) -> Result<()> {
        if let Some(c) = self.cursor.bump()? {
            if c == '\r' && self.cursor.rest().starts_with(b"\n") {
                self.cursor.bump()?;
            }
        }
        Ok(())
    }

    fn single_char_token(&mut self, kind: TokenKind) -> Result<Token> {
        let start = self.here();
        self.cursor.bump()?;
        Ok(Token::new(kind, self.span_from(start)))
    }

    fn here(&self) -> Mark {
        Mark {
            position: self.cursor.position(),
            line: self.cursor.line(),
            column: self.cursor.column(),
        }
    }

    fn span_from(&self, mark: Mark) -> Span {
        Span::new(
            mark.position,
            self.cursor.position(),
            mark.line,
            mark.column,
        )
    }

    fn char_error(&self, kind: ErrorKind, c: char) -> ParseError {
        let start = self.cursor.position();
        ParseError::new(
            kind,
            Span::new(
                start,
                start + c.len_utf8(),
                self.cursor.line(),
                self.cursor.column(),
            ),
        )
    }
}
