//! Byte cursor with strict UTF-8 decoding.
//!
//! The cursor owns the position state for a single pass over the input
//! buffer: it decodes one scalar value at a time, rejects every byte
//! sequence strict UTF-8 rejects (truncated sequences, overlong
//! encodings, surrogate halves, values past U+10FFFF), and tracks
//! 1-based line and column numbers across all eight line-terminator
//! flavors. A byte-order mark at offset 0 is skipped before the first
//! decode.

use confetti_util::{ErrorKind, ParseError, Result, Span};

use crate::unicode::is_line_break;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// A cursor for traversing a UTF-8 buffer one code point at a time.
///
/// # Example
///
/// ```
/// use confetti_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"ab");
/// assert_eq!(cursor.peek().unwrap(), Some('a'));
/// cursor.bump().unwrap();
/// assert_eq!(cursor.peek().unwrap(), Some('b'));
/// ```
pub struct Cursor<'a> {
    /// The raw input buffer.
    bytes: &'a [u8],

    /// Current byte position.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in code points).
    column: u32,

    /// True when the previously consumed code point was CR, so that the
    /// LF of a CRLF pair does not count as a second line break.
    after_carriage_return: bool,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over the given buffer, skipping a single
    /// byte-order mark at offset 0 if present.
    pub fn new(bytes: &'a [u8]) -> Self {
        let position = if bytes.starts_with(BOM) { BOM.len() } else { 0 };
        Self {
            bytes,
            position,
            line: 1,
            column: 1,
            after_carriage_return: false,
        }
    }

    /// Decodes the code point at the current position without consuming
    /// it. Returns `None` at the end of the buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new(b"ab");
    /// assert_eq!(cursor.peek().unwrap(), Some('a'));
    /// assert_eq!(cursor.peek().unwrap(), Some('a'));
    /// ```
    pub fn peek(&self) -> Result<Option<char>> {
        Ok(self.decode_at(self.position)?.map(|(c, _)| c))
    }

    /// Decodes the code point after the current one.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("aé".as_bytes());
    /// assert_eq!(cursor.peek_second().unwrap(), Some('é'));
    ///
    /// let cursor = Cursor::new(b"a");
    /// assert_eq!(cursor.peek_second().unwrap(), None);
    /// ```
    pub fn peek_second(&self) -> Result<Option<char>> {
        match self.decode_at(self.position)? {
            None => Ok(None),
            Some((_, len)) => Ok(self
                .decode_at(self.position + len)?
                .map(|(c, _)| c)),
        }
    }

    /// Consumes and returns the code point at the current position,
    /// updating line and column tracking.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"ab");
    /// assert_eq!(cursor.bump().unwrap(), Some('a'));
    /// assert_eq!(cursor.bump().unwrap(), Some('b'));
    /// assert_eq!(cursor.bump().unwrap(), None);
    /// ```
    pub fn bump(&mut self) -> Result<Option<char>> {
        let Some((c, len)) = self.decode_at(self.position)? else {
            return Ok(None);
        };
        self.position += len;
        if is_line_break(c) {
            if !(c == '\n' && self.after_carriage_return) {
                self.line += 1;
            }
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.after_carriage_return = c == '\r';
        Ok(Some(c))
    }

    /// Returns the current byte position.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("é!".as_bytes());
    /// assert_eq!(cursor.position(), 0);
    /// cursor.bump().unwrap();
    /// assert_eq!(cursor.position(), 2); // 'é' is two bytes
    /// ```
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the current line number (1-based).
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"a\nb");
    /// assert_eq!(cursor.line(), 1);
    /// cursor.bump().unwrap(); // 'a'
    /// cursor.bump().unwrap(); // '\n'
    /// assert_eq!(cursor.line(), 2);
    /// ```
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"ab\nc");
    /// assert_eq!(cursor.column(), 1);
    /// cursor.bump().unwrap();
    /// assert_eq!(cursor.column(), 2);
    /// cursor.bump().unwrap();
    /// cursor.bump().unwrap(); // '\n' resets the column
    /// assert_eq!(cursor.column(), 1);
    /// ```
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns true once every byte has been consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"a");
    /// assert!(!cursor.is_at_end());
    /// cursor.bump().unwrap();
    /// assert!(cursor.is_at_end());
    /// ```
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Returns the unconsumed remainder of the buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"abc");
    /// assert_eq!(cursor.rest(), b"abc");
    /// cursor.bump().unwrap();
    /// assert_eq!(cursor.rest(), b"bc");
    /// ```
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }

    /// Strict UTF-8 decode at an arbitrary byte offset.
    ///
    /// The second-byte ranges follow the Unicode well-formedness table,
    /// which excludes overlong encodings (0xC0/0xC1, 0xE0 0x80..0x9F,
    /// 0xF0 0x80..0x8F), surrogates (0xED 0xA0..0xBF), and values past
    /// U+10FFFF (0xF4 0x90.. and 0xF5..).
    ///
    /// # Example
    ///
    /// Observable through `peek`:
    ///
    /// ```
    /// use confetti_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new(b"\xF0\x9F\x98\x80");
    /// assert_eq!(cursor.peek().unwrap(), Some('😀'));
    ///
    /// // Overlong encoding of U+0020.
    /// let cursor = Cursor::new(b"\xC0\xA0");
    /// assert!(cursor.peek().is_err());
    /// ```
    fn decode_at(&self, pos: usize) -> Result<Option<(char, usize)>> {
        let Some(&b0) = self.bytes.get(pos) else {
            return Ok(None);
        };
        if b0 < 0x80 {
            return Ok(Some((b0 as char, 1)));
        }
        let (len, second_lo, second_hi) = match b0 {
            0xC2..=0xDF => (2, 0x80, 0xBF),
            0xE0 => (3, 0xA0, 0xBF),
            0xE1..=0xEC => (3, 0x80, 0xBF),
            0xED => (3, 0x80, 0x9F),
            0xEE..=0xEF => (3, 0x80, 0xBF),
            0xF0 => (4, 0x90, 0xBF),
            0xF1..=0xF3 => (4, 0x80, 0xBF),
            0xF4 => (4, 0x80, 0x8F),
            _ => return Err(self.malformed(pos)),
        };
        let Some(&b1) = self.bytes.get(pos + 1) else {
            return Err(self.malformed(pos));
        };
        if b1 < second_lo || b1 > second_hi {
            return Err(self.malformed(pos));
        }
        let mut value = match len {
            2 => u32::from(b0 & 0x1F),
            3 => u32::from(b0 & 0x0F),
            _ => u32::from(b0 & 0x07),
        };
        value = (value << 6) | u32::from(b1 & 0x3F);
        for i in 2..len {
            let Some(&b) = self.bytes.get(pos + i) else {
                return Err(self.malformed(pos));
            };
            if !(0x80..=0xBF).contains(&b) {
                return Err(self.malformed(pos));
            }
            value = (value << 6) | u32::from(b & 0x3F);
        }
        match char::from_u32(value) {
            Some(c) => Ok(Some((c, len))),
            None => Err(self.malformed(pos)),
        }
    }

    fn malformed(&self, pos: usize) -> ParseError {
        ParseError::new(
            ErrorKind::MalformedUtf8,
            Span::new(pos, (pos + 1).min(self.bytes.len()), self.line, self.column),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(cursor: &mut Cursor<'_>) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = cursor.bump()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn test_ascii() {
        let mut cursor = Cursor::new(b"foo");
        assert_eq!(drain(&mut cursor).unwrap(), "foo");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_multibyte() {
        let mut cursor = Cursor::new("aé中\u{1F600}".as_bytes());
        assert_eq!(drain(&mut cursor).unwrap(), "aé中\u{1F600}");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new(b"ab");
        assert_eq!(cursor.peek().unwrap(), Some('a'));
        assert_eq!(cursor.peek().unwrap(), Some('a'));
        assert_eq!(cursor.peek_second().unwrap(), Some('b'));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty() {
        let mut cursor = Cursor::new(b"");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek().unwrap(), None);
        assert_eq!(cursor.bump().unwrap(), None);
    }

    #[test]
    fn test_bom_skipped_at_start() {
        let mut cursor = Cursor::new("\u{FEFF}x".as_bytes());
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.bump().unwrap(), Some('x'));
    }

    #[test]
    fn test_bom_only_at_start() {
        // A BOM later in the buffer decodes as an ordinary code point.
        let mut cursor = Cursor::new("x\u{FEFF}".as_bytes());
        assert_eq!(cursor.bump().unwrap(), Some('x'));
        assert_eq!(cursor.bump().unwrap(), Some('\u{FEFF}'));
    }

    #[test]
    fn test_line_column_tracking() {
        let mut cursor = Cursor::new(b"ab\ncd");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.bump().unwrap();
        cursor.bump().unwrap();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.bump().unwrap(); // '\n'
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
        cursor.bump().unwrap();
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn test_crlf_counts_once() {
        let mut cursor = Cursor::new(b"a\r\nb");
        cursor.bump().unwrap();
        cursor.bump().unwrap(); // '\r'
        assert_eq!(cursor.line(), 2);
        cursor.bump().unwrap(); // '\n' of the pair
        assert_eq!(cursor.line(), 2);
        cursor.bump().unwrap();
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn test_cr_then_cr_counts_twice() {
        let mut cursor = Cursor::new(b"\r\r");
        cursor.bump().unwrap();
        cursor.bump().unwrap();
        assert_eq!(cursor.line(), 3);
    }

    #[test]
    fn test_all_line_terminators_advance_line() {
        for term in ["\n", "\x0B", "\x0C", "\r", "\u{85}", "\u{2028}", "\u{2029}"] {
            let text = format!("a{term}b");
            let mut cursor = Cursor::new(text.as_bytes());
            drain(&mut cursor).unwrap();
            assert_eq!(cursor.line(), 2, "terminator {:?}", term);
        }
    }

    #[test]
    fn test_truncated_sequence() {
        // Truncated U+1F600.
        let mut cursor = Cursor::new(b"\xF0\x9F\x98");
        let err = drain(&mut cursor).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedUtf8);
    }

    #[test]
    fn test_overlong_two_byte() {
        // 0xC0 0xA0 would decode to U+0020.
        let mut cursor = Cursor::new(b"\xC0\xA0");
        assert_eq!(
            drain(&mut cursor).unwrap_err().kind,
            ErrorKind::MalformedUtf8
        );
    }

    #[test]
    fn test_truncated_overlong_lead() {
        let mut cursor = Cursor::new(b"\xC1");
        assert_eq!(
            drain(&mut cursor).unwrap_err().kind,
            ErrorKind::MalformedUtf8
        );
    }

    #[test]
    fn test_overlong_three_byte() {
        // 0xE0 0x80 0xA0 is an overlong encoding.
        let mut cursor = Cursor::new(b"\xE0\x80\xA0");
        assert_eq!(
            drain(&mut cursor).unwrap_err().kind,
            ErrorKind::MalformedUtf8
        );
    }

    #[test]
    fn test_surrogate_half() {
        // 0xED 0xA0 0x80 would decode to U+D800.
        let mut cursor = Cursor::new(b"\xED\xA0\x80");
        assert_eq!(
            drain(&mut cursor).unwrap_err().kind,
            ErrorKind::MalformedUtf8
        );
    }

    #[test]
    fn test_stray_continuation_bytes() {
        for bytes in [&b"fo\xD8\x3Do"[..], &b"fo\xDE\x00o"[..], &b"\x80"[..]] {
            let mut cursor = Cursor::new(bytes);
            assert_eq!(
                drain(&mut cursor).unwrap_err().kind,
                ErrorKind::MalformedUtf8,
                "bytes {:?}",
                bytes
            );
        }
    }

    #[test]
    fn test_invalid_octet_sequence() {
        let mut cursor = Cursor::new(b"\xF0\x28\x8C\xBC");
        let err = drain(&mut cursor).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedUtf8);
        assert_eq!(err.span.start, 0);
    }

    #[test]
    fn test_past_max_scalar() {
        let mut cursor = Cursor::new(b"\xF4\x90\x80\x80");
        assert_eq!(
            drain(&mut cursor).unwrap_err().kind,
            ErrorKind::MalformedUtf8
        );
    }

    #[test]
    fn test_malformed_error_position() {
        let mut cursor = Cursor::new(b"foo\xF0\x28\x8C\xBCbar");
        let err = drain(&mut cursor).unwrap_err();
        assert_eq!(err.span.start, 3);
        assert_eq!(err.span.line, 1);
        assert_eq!(err.span.column, 4);
    }

    #[test]
    fn test_agreement_with_std() {
        // The hand-rolled decoder and std must accept the same inputs.
        let cases: &[&[u8]] = &[
            b"plain ascii",
            "\u{7FF}\u{800}\u{FFFD}\u{10FFFF}".as_bytes(),
            b"\xED\x9F\xBF",        // U+D7FF, last before surrogates
            b"\xEE\x80\x80",        // U+E000, first after surrogates
            b"\xC2\x80",            // smallest two-byte
            b"\xF4\x8F\xBF\xBF",    // U+10FFFF
        ];
        for bytes in cases {
            let mut cursor = Cursor::new(bytes);
            let decoded = drain(&mut cursor).unwrap();
            assert_eq!(decoded, std::str::from_utf8(bytes).unwrap());
        }
    }
}
