//! Command implementations for the conft CLI.

pub mod check;
pub mod snapshot;

pub use check::run_check;
pub use snapshot::run_snapshot;
