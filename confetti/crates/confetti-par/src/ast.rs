//! The directive tree.
//!
//! Directives own their arguments and subdirectives by value; there are
//! no back-references to parents. Everything is decoded, heap-owned
//! text; spans are the only connection back to the input buffer.

use confetti_lex::{ArgumentKind, Comment};
use confetti_util::Span;

/// A parsed document: the top-level directives plus any captured
/// comments, both in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub directives: Vec<Directive>,
    pub comments: Vec<Comment>,
}

impl Document {
    /// True when the document has no directives.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// One directive: one or more arguments and an optional block of
/// subdirectives. The span is that of the first argument.
///
/// A directive always has at least one argument; the parser never
/// constructs one without.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub arguments: Vec<Argument>,
    pub subdirectives: Vec<Directive>,
    pub span: Span,
}

impl Directive {
    /// Starts a directive from its first argument.
    pub(crate) fn new(first: Argument) -> Self {
        let span = first.span;
        Self {
            arguments: vec![first],
            subdirectives: Vec::new(),
            span,
        }
    }

    /// True when the directive has a non-empty block.
    pub fn has_subdirectives(&self) -> bool {
        !self.subdirectives.is_empty()
    }
}

/// A decoded argument with its source form tag and span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub value: String,
    pub kind: ArgumentKind,
    pub span: Span,
}
