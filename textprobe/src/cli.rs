// textprobe/src/cli.rs
//! Command-line interface definition for the textprobe application.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use textprobe_core::{Backend, Operation, RecurseDirection};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "textprobe",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Evaluate text file content objects against local files",
    long_about = "textprobe scans files for every occurrence of a regular expression, selects occurrences by their instance number and reports the selected matches with their capture groups as JSON. Objects follow the textfilecontent54 shape: a file location, a pattern, an instance selector and optional behaviors.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an object and print the collected items.
    Probe(ProbeArgs),

    /// Resolve an object and compile its pattern without touching any file.
    Check(ObjectArgs),
}

/// Object source: a YAML file, inline flags, or a file with inline overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct ObjectArgs {
    #[arg(long, short = 'o', value_name = "FILE", help = "Read the probe object from a YAML file.")]
    pub object: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory holding the file (use with --filename).")]
    pub path: Option<String>,

    #[arg(long, value_name = "NAME", help = "File name inside --path.")]
    pub filename: Option<String>,

    #[arg(long, value_name = "FILE", help = "Full path of the file. Takes precedence over --path/--filename.")]
    pub filepath: Option<String>,

    #[arg(long, short = 'p', value_name = "REGEX", help = "Regular expression to search for.")]
    pub pattern: Option<String>,

    #[arg(long, short = 'i', value_name = "N", allow_negative_numbers = true, help = "Instance value compared against each match ordinal.")]
    pub instance: Option<i64>,

    #[arg(long, value_enum, value_name = "OP", requires = "instance", help = "Comparison applied between match ordinals and --instance.")]
    pub operation: Option<OperationArg>,

    #[arg(long, help = "Match case-insensitively.")]
    pub ignore_case: bool,

    #[arg(long, help = "Let '^' and '$' match only at the buffer ends.")]
    pub no_multiline: bool,

    #[arg(long, help = "Let '.' match newlines.")]
    pub singleline: bool,

    #[arg(long, value_name = "N", allow_negative_numbers = true, help = "Maximum recursion depth (-1 for unlimited).")]
    pub max_depth: Option<i64>,

    #[arg(long, value_enum, value_name = "DIR", help = "Recursion direction for path-based objects.")]
    pub recurse_direction: Option<RecurseDirectionArg>,

    #[arg(long, short = 'b', value_enum, value_name = "ENGINE", help = "Regex backend to compile the pattern with.")]
    pub backend: Option<BackendArg>,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub object: ObjectArgs,

    #[arg(long, value_name = "BYTES", default_value_t = textprobe_core::buffer::DEFAULT_CHUNK_SIZE, value_parser = clap::value_parser!(usize), help = "Read chunk size in bytes.")]
    pub chunk_size: usize,

    #[arg(long = "out", value_name = "FILE", help = "Write the JSON result to a file instead of stdout.")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Regex,
    Pcre2,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Regex => Backend::Regex,
            BackendArg::Pcre2 => Backend::Pcre2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Equals,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    BitwiseAnd,
    BitwiseOr,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Equals => Operation::Equals,
            OperationArg::NotEqual => Operation::NotEqual,
            OperationArg::GreaterThan => Operation::GreaterThan,
            OperationArg::GreaterThanOrEqual => Operation::GreaterThanOrEqual,
            OperationArg::LessThan => Operation::LessThan,
            OperationArg::LessThanOrEqual => Operation::LessThanOrEqual,
            OperationArg::BitwiseAnd => Operation::BitwiseAnd,
            OperationArg::BitwiseOr => Operation::BitwiseOr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecurseDirectionArg {
    None,
    Up,
    Down,
}

impl From<RecurseDirectionArg> for RecurseDirection {
    fn from(arg: RecurseDirectionArg) -> Self {
        match arg {
            RecurseDirectionArg::None => RecurseDirection::None,
            RecurseDirectionArg::Up => RecurseDirection::Up,
            RecurseDirectionArg::Down => RecurseDirection::Down,
        }
    }
}
