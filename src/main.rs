//! Exportar CLI
//!
//! Checkpoint-to-ONNX conversion entry point.
//!
//! # Usage
//!
//! ```bash
//! # Convert a single model
//! exportar convert --model mirth/chonky_distilbert_base_uncased_1
//!
//! # Convert into an explicit directory, forcing the manual trace path
//! exportar convert --model org/model --output ./models/custom --manual
//!
//! # Convert every registered default model
//! exportar convert-all
//!
//! # List the registered default models
//! exportar list-models
//!
//! # Re-verify a converted bundle
//! exportar verify ./models/distilbert
//! ```

use clap::Parser;
use exportar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
