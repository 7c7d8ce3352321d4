//! Export strategy selection: delegated backend first, manual trace fallback.
//!
//! The delegated path asks an external export capability to write a
//! self-contained graph plus config into the output directory. Any failure
//! there is downgraded to a recorded warning and the manual path runs exactly
//! once: trace-export against fixed-shape synthetic inputs, with the batch
//! and sequence axes declared dynamic so the graph accepts variable shapes at
//! inference time. A manual failure is fatal.

use std::path::Path;

use crate::hub::LoadedModel;

use super::error::{ConvertError, Result};

/// Filename of the manually traced graph.
pub const GRAPH_FILE: &str = "model.onnx";

/// ONNX opset version used for manual export.
pub const TRACE_OPSET: i64 = 14;

/// Batch size of the synthetic trace inputs.
pub const TRACE_BATCH: usize = 1;

/// Sequence length of the synthetic trace inputs.
pub const TRACE_SEQ_LEN: usize = 512;

/// Which export path produced the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMethod {
    /// External export backend
    Delegated,
    /// Local trace export
    Manual,
}

impl std::fmt::Display for ExportMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delegated => write!(f, "delegated"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// One synthetic input stream for trace export.
#[derive(Debug, Clone)]
pub struct SyntheticInput {
    /// Graph input name
    pub name: &'static str,
    /// Flattened `[batch, seq_len]` tensor data
    pub data: Vec<i64>,
    /// Tensor dimensions
    pub dims: [usize; 2],
}

/// Fixed-shape trace description for the manual export path.
#[derive(Debug, Clone)]
pub struct TraceSpec {
    /// Batch size of the dummy inputs
    pub batch: usize,
    /// Sequence length of the dummy inputs
    pub seq_len: usize,
    /// ONNX opset version
    pub opset: i64,
    /// Fold constant subgraphs during export
    pub constant_folding: bool,
}

impl TraceSpec {
    /// Input names, in graph order.
    pub const INPUT_NAMES: [&'static str; 3] = ["input_ids", "attention_mask", "token_type_ids"];

    /// Output name of the classification logits.
    pub const OUTPUT_NAME: &'static str = "logits";

    /// Names of the dynamic axes, applied to the first two axes of every
    /// input and of the output.
    pub const DYNAMIC_AXES: [&'static str; 2] = ["batch_size", "sequence_length"];

    /// Build the synthetic input tensors: token ids and attention mask all
    /// ones, token-type ids all zeros.
    #[must_use]
    pub fn synthetic_inputs(&self) -> Vec<SyntheticInput> {
        let len = self.batch * self.seq_len;
        let dims = [self.batch, self.seq_len];
        vec![
            SyntheticInput { name: Self::INPUT_NAMES[0], data: vec![1; len], dims },
            SyntheticInput { name: Self::INPUT_NAMES[1], data: vec![1; len], dims },
            SyntheticInput { name: Self::INPUT_NAMES[2], data: vec![0; len], dims },
        ]
    }
}

impl Default for TraceSpec {
    fn default() -> Self {
        Self {
            batch: TRACE_BATCH,
            seq_len: TRACE_SEQ_LEN,
            opset: TRACE_OPSET,
            constant_folding: true,
        }
    }
}

/// Delegated export capability.
///
/// Writes a serialized graph plus config directly into the output directory.
pub trait GraphExporter {
    /// Export the model graph for `model_id` into `out_dir`.
    ///
    /// # Errors
    ///
    /// Any error from the backend; the caller treats it as recoverable.
    fn export_graph(&self, model_id: &str, out_dir: &Path) -> Result<()>;
}

/// Manual trace-export capability.
pub trait GraphTracer {
    /// Trace `model` against the spec's synthetic inputs and write the graph
    /// to `out_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ManualExport`] on tracing failure; fatal for
    /// the pipeline.
    fn trace_graph(&self, model: &LoadedModel, spec: &TraceSpec, out_path: &Path) -> Result<()>;
}

/// Outcome of the export stage.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Which path produced the graph
    pub method: ExportMethod,
    /// Delegated-backend error that forced the fallback, if any
    pub fallback_warning: Option<String>,
}

/// Run the export stage: delegated path when preferred, manual fallback on
/// any delegated error, manual failure fatal.
///
/// The delegated attempt's result is inspected here rather than propagated,
/// so the fallback decision stays explicit.
///
/// # Errors
///
/// Returns the manual-export error when the last available path fails.
pub fn run_export<D: GraphExporter, T: GraphTracer>(
    delegated: &D,
    tracer: &T,
    model: &LoadedModel,
    out_dir: &Path,
    prefer_delegated: bool,
) -> Result<ExportOutcome> {
    let fallback_warning = if prefer_delegated {
        match delegated.export_graph(&model.model_id, out_dir) {
            Ok(()) => {
                return Ok(ExportOutcome {
                    method: ExportMethod::Delegated,
                    fallback_warning: None,
                })
            }
            Err(err) => Some(err.to_string()),
        }
    } else {
        None
    };

    let spec = TraceSpec::default();
    tracer
        .trace_graph(model, &spec, &out_dir.join(GRAPH_FILE))
        .map_err(|err| match err {
            manual @ ConvertError::ManualExport { .. } => manual,
            other => ConvertError::ManualExport {
                message: other.to_string(),
            },
        })?;

    Ok(ExportOutcome {
        method: ExportMethod::Manual,
        fallback_warning,
    })
}
