//! Unicode classification for the Confetti lexer.
//!
//! Every code point falls into exactly one lexical class: line break,
//! whitespace, forbidden, punctuator starter, or argument character.
//! Membership is decided from the general-category tables compiled into
//! the binary by `unicode-properties`, so results never depend on the
//! host locale. Letters, marks, numbers, punctuation, symbols, format
//! characters (Cf), and private-use characters (Co) all continue
//! arguments, which lets arbitrary scripts form bare arguments without
//! quoting.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// The lexical class of a single code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// One of the eight line terminators.
    LineBreak,
    /// `White_Space` code points other than line terminators.
    Whitespace,
    /// Control and unassigned code points that may not appear in input.
    Forbidden,
    /// A character that begins punctuation, a comment, a quote, or an
    /// escape: `{`, `}`, `;`, `#`, `"`, `\`.
    PunctuatorStart,
    /// Any other assigned code point; continues an argument.
    Argument,
}

/// Returns true for the eight line terminators: LF, VT, FF, CR (and so
/// CRLF), NEL, LS, and PS.
///
/// # Example
///
/// ```
/// use confetti_lex::unicode::is_line_break;
///
/// assert!(is_line_break('\n'));
/// assert!(is_line_break('\u{2028}'));
/// assert!(!is_line_break(' '));
/// ```
#[inline]
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\u{000A}' | // LF
        '\u{000B}' | // VT
        '\u{000C}' | // FF
        '\u{000D}' | // CR
        '\u{0085}' | // NEL
        '\u{2028}' | // LS
        '\u{2029}' // PS
    )
}

/// Returns true for `White_Space` code points that are not line
/// terminators (space, tab, NBSP, the U+2000 block, and so on).
#[inline]
pub fn is_inline_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_line_break(c)
}

/// Returns true for characters that may not appear anywhere in a
/// document: C0/C1 controls and unassigned code points.
///
/// Tab and the line-terminator controls are carved out. U+001A is
/// forbidden here too; the lexer separately accepts it as a clean end
/// of input when it is the final code point of the buffer.
pub fn is_forbidden(c: char) -> bool {
    if c == '\t' || is_line_break(c) {
        return false;
    }
    matches!(
        c.general_category(),
        GeneralCategory::Control | GeneralCategory::Unassigned
    )
}

/// Returns true for the characters that begin punctuation, comments,
/// quotes, or escapes.
#[inline]
pub fn is_punctuator_starter(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | '#' | '"' | '\\')
}

/// Classifies a code point.
///
/// # Example
///
/// ```
/// use confetti_lex::unicode::{classify, CharClass};
///
/// assert_eq!(classify('x'), CharClass::Argument);
/// assert_eq!(classify('{'), CharClass::PunctuatorStart);
/// assert_eq!(classify('\u{1}'), CharClass::Forbidden);
/// ```
pub fn classify(c: char) -> CharClass {
    if is_line_break(c) {
        CharClass::LineBreak
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_punctuator_starter(c) {
        CharClass::PunctuatorStart
    } else if is_forbidden(c) {
        CharClass::Forbidden
    } else {
        CharClass::Argument
    }
}
