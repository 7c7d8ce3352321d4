//! CLI argument types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Exportar: checkpoint conversion for portable inference
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "exportar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Convert token-classification checkpoints into portable ONNX inference bundles")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert a model into an ONNX inference bundle
    Convert(ConvertArgs),

    /// Convert every registered default model
    ConvertAll,

    /// List registered default models and their strides
    ListModels,

    /// Verify the artifacts in a converted model directory
    Verify(VerifyArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ConvertArgs {
    /// HuggingFace model name or path to convert
    #[arg(short, long)]
    pub model: String,

    /// Output directory for the converted bundle
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the delegated export backend and trace locally
    #[arg(long)]
    pub manual: bool,

    /// Quantize the model for smaller size and faster inference
    #[arg(long)]
    pub quantize: bool,
}

/// Arguments for the verify command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct VerifyArgs {
    /// Converted model directory to inspect
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
