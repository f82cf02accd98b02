//! The snapshot subcommand.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use confetti_par::{parse_with_options, snapshot, Options};

/// Parses `input` and prints its snapshot form to stdout, or the
/// canonical error line if the parse fails. Returns whether the
/// document parsed.
pub fn run_snapshot(input: &Path, options: &Options, comments: bool) -> Result<bool> {
    let bytes = fs::read(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    match parse_with_options(&bytes, options) {
        Ok(document) => {
            print!("{}", snapshot::render(&document));
            if comments {
                for comment in &document.comments {
                    println!("#{}", comment.text);
                }
            }
            Ok(true)
        }
        Err(err) => {
            print!("{}", err.render());
            Ok(false)
        }
    }
}
