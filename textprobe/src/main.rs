// textprobe/src/main.rs
//! textprobe entry point.

use anyhow::Result;
use clap::Parser;
use log::debug;

use textprobe::cli::Cli;
use textprobe::commands::{self, EXIT_FAILURE, EXIT_OK};
use textprobe::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    debug!("Parsed arguments: {:?}", cli);

    match commands::run(&cli) {
        Ok(EXIT_OK) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => match commands::exit_code_for(&err) {
            EXIT_FAILURE => Err(err),
            code => {
                eprintln!("Error: {:#}", err);
                std::process::exit(code)
            }
        },
    }
}
