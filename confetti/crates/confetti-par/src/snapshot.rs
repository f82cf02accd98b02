//! Textual snapshot rendering.
//!
//! The conformance suite compares parses in a plain textual form: each
//! directive prints its arguments as `<a> <b>` on one line; a non-empty
//! block renders as ` [` after the arguments, subdirectives indented by
//! four spaces, and a closing `]` at the parent's indent. Empty blocks
//! render as the bare directive. Errors render as `error: <message>\n`
//! (see [`confetti_util::ParseError::render`]).

use crate::ast::{Directive, Document};

const INDENT: &str = "    ";

/// Renders a document in the snapshot form.
///
/// # Example
///
/// ```
/// let document = confetti_par::parse(b"foo bar { baz }").unwrap();
/// assert_eq!(
///     confetti_par::snapshot::render(&document),
///     "<foo> <bar> [\n    <baz>\n]\n"
/// );
/// ```
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    write_directives(&mut out, &document.directives, 0);
    out
}

fn write_directives(out: &mut String, directives: &[Directive], depth: usize) {
    for directive in directives {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        for (index, argument) in directive.arguments.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            out.push('<');
            out.push_str(&argument.value);
            out.push('>');
        }
        if directive.subdirectives.is_empty() {
            out.push('\n');
        } else {
            out.push_str(" [\n");
            write_directives(out, &directive.subdirectives, depth + 1);
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            out.push_str("]\n");
        }
    }
}
