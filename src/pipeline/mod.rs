//! Conversion-and-verification pipeline.
//!
//! Sequences output resolution, graph export with delegated-to-manual
//! fallback, auxiliary artifact persistence, and post-hoc verification of
//! the produced artifact set.
//!
//! # Example
//!
//! ```ignore
//! use exportar::hub::{HubGraphExporter, HubProvider};
//! use exportar::onnx::OnnxTracer;
//! use exportar::pipeline::{resolver, ConversionRequest, Pipeline};
//!
//! let output = resolver::resolve_output_dir("mirth/chonky_distilbert_base_uncased_1", None)?;
//! let pipeline = Pipeline::new(HubProvider::new(), HubGraphExporter::new(), OnnxTracer::new());
//! let result = pipeline.run(&ConversionRequest::new("mirth/chonky_distilbert_base_uncased_1", output));
//! ```

mod artifacts;
mod error;
mod export;
mod request;
pub mod resolver;
mod runner;
pub mod verify;


pub use artifacts::{save_config, save_metadata, save_tokenizer, ModelMetadata, METADATA_FILE};
pub use error::{ConvertError, Result};
pub use export::{
    run_export, ExportMethod, ExportOutcome, GraphExporter, GraphTracer, SyntheticInput,
    TraceSpec, GRAPH_FILE, TRACE_BATCH, TRACE_OPSET, TRACE_SEQ_LEN,
};
pub use request::{ConversionRequest, ConversionResult, Stage};
pub use runner::Pipeline;
pub use verify::{classify_family, ArtifactReport, TokenizerFamily};
