//! Conversion request and result types.

use std::path::PathBuf;

use serde::Serialize;

use super::export::ExportMethod;
use super::verify::ArtifactReport;

/// A single conversion to perform. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Model identifier (HuggingFace repo id or local path)
    pub model_id: String,
    /// Resolved output directory
    pub output_dir: PathBuf,
    /// Prefer the delegated export backend over manual tracing
    pub use_delegated: bool,
    /// Quantization was requested (accepted but currently inert)
    pub quantize: bool,
}

impl ConversionRequest {
    /// Create a request with default options (delegated export, no quantization).
    #[must_use]
    pub fn new(model_id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_id: model_id.into(),
            output_dir: output_dir.into(),
            use_delegated: true,
            quantize: false,
        }
    }

    /// Set whether the delegated export backend is preferred.
    #[must_use]
    pub fn use_delegated(mut self, use_delegated: bool) -> Self {
        self.use_delegated = use_delegated;
        self
    }

    /// Set the quantization flag.
    #[must_use]
    pub fn quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Loading the model configuration
    Config,
    /// Loading model weights and tokenizer
    ModelLoad,
    /// Producing the serialized graph
    Export,
    /// Persisting tokenizer files
    TokenizerSave,
    /// Persisting configuration and metadata
    MetadataSave,
    /// Post-hoc artifact verification
    Verify,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::ModelLoad => "model-load",
            Self::Export => "export",
            Self::TokenizerSave => "tokenizer-save",
            Self::MetadataSave => "metadata-save",
            Self::Verify => "verify",
        };
        write!(f, "{name}")
    }
}

/// Outcome of one pipeline run. Produced exactly once per conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Whether the conversion completed and verified
    pub success: bool,
    /// Last stage the pipeline reached
    pub stage: Stage,
    /// Error detail when `success` is false
    pub error: Option<String>,
    /// Which export path produced the graph, if the export stage completed
    pub export_method: Option<ExportMethod>,
    /// Warning recorded when the delegated backend failed and the manual
    /// path substituted
    pub fallback_warning: Option<String>,
    /// File-presence findings from the verification stage
    pub report: Option<ArtifactReport>,
}

impl ConversionResult {
    /// Build a terminal failure result for a stage.
    #[must_use]
    pub fn failure(stage: Stage, error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            stage,
            error: Some(error.to_string()),
            export_method: None,
            fallback_warning: None,
            report: None,
        }
    }

    /// Attach the export outcome to a result.
    #[must_use]
    pub fn with_export(mut self, method: ExportMethod, warning: Option<String>) -> Self {
        self.export_method = Some(method);
        self.fallback_warning = warning;
        self
    }
}
