//! CLI module for exportar
//!
//! This module contains all CLI command handlers and utilities.

mod args;
mod commands;
mod logging;

pub use args::{Cli, Command, ConvertArgs, VerifyArgs};
pub use commands::run_command;
pub use logging::LogLevel;
