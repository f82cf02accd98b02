//! Conft - snapshot tooling for Confetti documents.
//!
//! `conft snapshot` parses a document and prints its textual snapshot
//! form (or the canonical error line); `conft check` runs a directory
//! of `<name>.in` files against `<name>.out` / `<name>.err`
//! expectations. Both exist to exercise the parser crates end to end.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_check, run_snapshot};
use confetti_par::Options;

/// Conft - snapshot tooling for Confetti documents
#[derive(Parser, Debug)]
#[command(name = "conft")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Snapshot tooling for Confetti documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "CONFT_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, global = true, env = "CONFT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the conft CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a document and print its snapshot form
    ///
    /// Successful parses print one line per directive with arguments in
    /// angle brackets; blocks are bracketed and indented. Parse errors
    /// print the canonical `error: <message>` line and exit non-zero.
    Snapshot(SnapshotCommand),

    /// Run a directory of snapshot expectations
    ///
    /// Every `<name>.in` file in the directory is parsed and compared
    /// against `<name>.out` (expected snapshot) or `<name>.err`
    /// (expected error line). Exits non-zero if any case fails.
    Check(CheckCommand),
}

/// Arguments for the snapshot subcommand.
#[derive(Parser, Debug)]
struct SnapshotCommand {
    /// Input document
    input: PathBuf,

    /// Also print captured comments after the tree
    #[arg(long)]
    comments: bool,

    #[command(flatten)]
    options: OptionFlags,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Directory holding <name>.in expectations
    dir: PathBuf,

    #[command(flatten)]
    options: OptionFlags,
}

/// Language option flags shared by the subcommands.
#[derive(Args, Clone, Debug)]
struct OptionFlags {
    /// Recognize // line comments in addition to #
    #[arg(long)]
    c_style_comments: bool,

    /// Allow ( ... ) expression arguments
    #[arg(long)]
    expression_arguments: bool,

    /// Extra punctuator recognized as a standalone argument; may repeat
    #[arg(long = "punctuator", value_name = "TEXT")]
    punctuators: Vec<String>,

    /// Cap on block nesting depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,
}

impl OptionFlags {
    fn to_options(&self, capture_comments: bool) -> Options {
        Options::new()
            .with_capture_comments(capture_comments)
            .with_c_style_comments(self.c_style_comments)
            .with_expression_arguments(self.expression_arguments)
            .with_punctuators(self.punctuators.clone())
            .with_max_depth(self.max_depth)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let outcome = match cli.command {
        Commands::Snapshot(command) => {
            let options = command.options.to_options(command.comments);
            run_snapshot(&command.input, &options, command.comments)
        }
        Commands::Check(command) => {
            let options = command.options.to_options(false);
            run_check(&command.dir, &options)
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("conft: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A second init (e.g. from tests) is ignored.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init();
}
