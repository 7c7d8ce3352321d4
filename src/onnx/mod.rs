//! Manual trace export: serialize a graph from a loaded model and a trace
//! spec, without any external backend.

mod writer;

use std::path::Path;

use crate::hub::LoadedModel;
use crate::pipeline::{ConvertError, GraphTracer, Result, TraceSpec};

use writer::{Dim, ValueDecl, ELEM_FLOAT, ELEM_INT64};

/// Trace exporter writing the graph with the built-in ONNX writer.
///
/// Inputs are traced at the spec's fixed shape, but every input's first two
/// axes and the output's are declared dynamic, so the graph accepts variable
/// batch size and sequence length at inference time.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnnxTracer;

impl OnnxTracer {
    /// Create a tracer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GraphTracer for OnnxTracer {
    fn trace_graph(&self, model: &LoadedModel, spec: &TraceSpec, out_path: &Path) -> Result<()> {
        let weights = model
            .weights_path
            .as_deref()
            .ok_or_else(|| ConvertError::ManualExport {
                message: format!("no local weights for {}", model.model_id),
            })?;
        if !weights.is_file() {
            return Err(ConvertError::ManualExport {
                message: format!("weights file missing: {}", weights.display()),
            });
        }

        let [batch_axis, seq_axis] = TraceSpec::DYNAMIC_AXES;
        let inputs: Vec<ValueDecl> = spec
            .synthetic_inputs()
            .iter()
            .map(|input| ValueDecl {
                name: input.name.to_string(),
                elem_type: ELEM_INT64,
                dims: vec![Dim::Dynamic(batch_axis), Dim::Dynamic(seq_axis)],
            })
            .collect();

        let outputs = vec![ValueDecl {
            name: TraceSpec::OUTPUT_NAME.to_string(),
            elem_type: ELEM_FLOAT,
            dims: vec![
                Dim::Dynamic(batch_axis),
                Dim::Dynamic(seq_axis),
                Dim::Fixed(model.config.num_labels as u64),
            ],
        }];

        writer::write_model(
            out_path,
            &format!("{}_token_classification", model.config.model_type),
            spec.opset as u64,
            &inputs,
            &outputs,
        )
        .map_err(|err| ConvertError::ManualExport {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::ModelConfig;
    use std::fs;
    use tempfile::TempDir;

    fn model_with_weights(dir: &Path) -> LoadedModel {
        let weights = dir.join("model.safetensors");
        fs::write(&weights, b"\0\0\0\0").unwrap();
        let config = ModelConfig::from_json(serde_json::json!({
            "model_type": "distilbert",
            "dim": 768,
            "max_position_embeddings": 512,
            "id2label": {"0": "O", "1": "SPLIT"}
        }))
        .unwrap();
        LoadedModel {
            model_id: "mirth/chonky_distilbert_base_uncased_1".into(),
            config,
            weights_path: Some(weights),
        }
    }

    #[test]
    fn test_trace_writes_graph_file() {
        let tmp = TempDir::new().unwrap();
        let model = model_with_weights(tmp.path());
        let out = tmp.path().join("model.onnx");

        OnnxTracer::new()
            .trace_graph(&model, &TraceSpec::default(), &out)
            .unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(!bytes.is_empty());
        let haystack = String::from_utf8_lossy(&bytes);
        for name in TraceSpec::INPUT_NAMES {
            assert!(haystack.contains(name), "missing input {name}");
        }
        assert!(haystack.contains("logits"));
    }

    #[test]
    fn test_trace_without_weights_fails() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_with_weights(tmp.path());
        model.weights_path = None;

        let result = OnnxTracer::new().trace_graph(
            &model,
            &TraceSpec::default(),
            &tmp.path().join("model.onnx"),
        );
        assert!(matches!(result, Err(ConvertError::ManualExport { .. })));
    }

    #[test]
    fn test_trace_with_missing_weights_file_fails() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_with_weights(tmp.path());
        model.weights_path = Some(tmp.path().join("gone.safetensors"));

        let result = OnnxTracer::new().trace_graph(
            &model,
            &TraceSpec::default(),
            &tmp.path().join("model.onnx"),
        );
        assert!(matches!(result, Err(ConvertError::ManualExport { .. })));
    }
}
