// textprobe/src/logger.rs
//! Logger setup for the CLI. Logs go to stderr so stdout only carries JSON.

use env_logger::{Builder, Env, Target};
use log::{debug, LevelFilter};

/// Installs the global logger.
///
/// An explicit `level` wins over `RUST_LOG`; without one the environment
/// decides, defaulting to `warn`. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    if let Err(err) = builder.try_init() {
        debug!("Logger already initialized, keeping the existing one: {}", err);
    }
}

/// Maps the `--quiet`/`--debug` flags to an explicit level, if any.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
