//! Exportar: checkpoint conversion for portable inference
//!
//! Converts pretrained token-classification checkpoints into a portable
//! inference bundle: a serialized ONNX graph plus the tokenizer and
//! configuration artifacts a consuming runtime needs. The pipeline prefers a
//! delegated export backend and falls back to a local trace export, then
//! verifies the produced artifact set before reporting success.
//!
//! # Example
//!
//! ```ignore
//! use exportar::hub::{HubGraphExporter, HubProvider};
//! use exportar::onnx::OnnxTracer;
//! use exportar::pipeline::{resolver, ConversionRequest, Pipeline};
//!
//! let model = "mirth/chonky_distilbert_base_uncased_1";
//! let output = resolver::resolve_output_dir(model, None)?;
//! let pipeline = Pipeline::new(HubProvider::new(), HubGraphExporter::new(), OnnxTracer::new());
//! let result = pipeline.run(&ConversionRequest::new(model, output));
//! assert!(result.success);
//! ```

pub mod cli;
pub mod hub;
pub mod onnx;
pub mod pipeline;
pub mod registry;
