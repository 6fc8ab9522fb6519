// textprobe/src/commands/mod.rs
//! Subcommand implementations and the exit-code policy they share.

pub mod check;
pub mod probe;

use anyhow::Result;
use textprobe_core::ProbeError;

use crate::cli::{Cli, Commands};

/// Evaluation ran to completion; per-file errors may still be reported.
pub const EXIT_OK: i32 = 0;
/// The evaluation could not complete (compile failure, I/O, serialization).
pub const EXIT_FAILURE: i32 = 1;
/// The object was incomplete or the arguments were unusable.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for an error that escaped a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProbeError>() {
        Some(ProbeError::MissingElement(_)) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Dispatches the parsed subcommand and returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Probe(args) => probe::run_probe_opts(args),
        Commands::Check(args) => check::run_check_opts(args),
    }
}
