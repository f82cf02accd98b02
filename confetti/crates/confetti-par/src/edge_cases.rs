//! Edge case and property tests for confetti-par.
