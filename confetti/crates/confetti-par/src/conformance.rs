//! End-to-end table tests over the snapshot form.
//!
//! Each case feeds a whole document through `parse` and compares either
//! the rendered snapshot (`<a> <b>` lines, `[` `]` blocks) or the
//! rendered error line byte-for-byte.
