//! CLI command implementations

mod convert;
mod list_models;
mod verify;


use crate::cli::args::{Cli, Command};
use crate::cli::LogLevel;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Convert(args) => convert::run_convert(args, log_level),
        Command::ConvertAll => convert::run_convert_all(log_level),
        Command::ListModels => list_models::run_list_models(log_level),
        Command::Verify(args) => verify::run_verify(args, log_level),
    }
}
