//! The check subcommand.
//!
//! A check directory holds cases named `<name>.in`, each paired with
//! either `<name>.out` (the expected snapshot) or `<name>.err` (the
//! expected canonical error line).

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use confetti_par::{parse_with_options, snapshot, Options};

/// Runs every case in `dir`. Returns whether all cases passed.
pub fn run_check(dir: &Path, options: &Options) -> Result<bool> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "in") {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    if names.is_empty() {
        bail!("no .in cases found in {}", dir.display());
    }
    names.sort();

    let mut failures = 0usize;
    for name in &names {
        let input = fs::read(dir.join(format!("{name}.in")))?;
        let expected = read_expectation(dir, name)?;
        let actual = match parse_with_options(&input, options) {
            Ok(document) => snapshot::render(&document),
            Err(err) => err.render(),
        };
        if actual == expected {
            debug!(case = name.as_str(), "ok");
        } else {
            failures += 1;
            println!("case {name} failed");
            println!("  expected: {expected:?}");
            println!("  actual:   {actual:?}");
        }
    }

    info!(total = names.len(), failures, "check finished");
    if failures == 0 {
        println!("{} cases passed", names.len());
    } else {
        println!("{failures} of {} cases failed", names.len());
    }
    Ok(failures == 0)
}

fn read_expectation(dir: &Path, name: &str) -> Result<String> {
    let out = dir.join(format!("{name}.out"));
    if out.exists() {
        return fs::read_to_string(&out)
            .with_context(|| format!("failed to read {}", out.display()));
    }
    let err = dir.join(format!("{name}.err"));
    if err.exists() {
        return fs::read_to_string(&err)
            .with_context(|| format!("failed to read {}", err.display()));
    }
    bail!("case {name} has neither a .out nor a .err expectation");
}
