//! confetti-lex - Lexical analysis for the Confetti configuration
//! language.
//!
//! The pipeline, leaves first:
//!
//! 1. [`cursor::Cursor`] owns the byte buffer, decodes one code point
//!    at a time with strict UTF-8 validation, and tracks line/column
//!    positions across the eight line-terminator flavors.
//! 2. [`unicode`] classifies each code point (line break, whitespace,
//!    forbidden, punctuator starter, argument character) from
//!    general-category tables compiled into the binary.
//! 3. [`lexer::Lexer`] consumes the cursor and emits typed tokens:
//!    decoded arguments (bare, quoted, triple-quoted), punctuation,
//!    line breaks, and end of input, with comments captured or
//!    discarded along the way.
//!
//! The lexer is streaming: the parser drives it one token at a time
//! and no token list is ever built.

pub mod cursor;
mod edge_cases;
pub mod lexer;
pub mod options;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use options::Options;
pub use token::{ArgumentKind, Comment, Token, TokenKind};
