//! confetti-util - Shared types for the Confetti parser crates.
//!
//! This crate provides the two building blocks every other crate in the
//! workspace needs: source spans (`Span`) and the structured error model
//! (`ErrorKind`, `ParseError`) with its canonical one-line rendering.

pub mod error;
pub mod span;

pub use error::{ErrorKind, ParseError, Result};
pub use span::Span;
