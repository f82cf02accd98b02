//! Edge case tests for confetti-lex.
