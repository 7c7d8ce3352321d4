//! Persisting auxiliary artifacts: tokenizer files, config, metadata.
//!
//! Each save step is independently fallible. A failure aborts the pipeline at
//! that stage without rolling back earlier writes; partial artifacts are left
//! on disk for inspection.

use std::path::Path;

use serde::Serialize;

use crate::hub::{ModelConfig, TokenizerBundle};
use crate::registry;

use super::error::{ConvertError, Result};
use super::verify::CONFIG_FILE;

/// Conversion metadata artifact.
pub const METADATA_FILE: &str = "metadata.json";

/// Persisted conversion metadata. Written once, never updated.
///
/// Key names match what the consuming runtime reads.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    /// Model identifier the conversion was requested with
    pub model_name: String,
    /// Architecture family from the configuration
    pub model_type: String,
    /// Task tag
    pub task: &'static str,
    /// Maximum sequence length the model supports
    pub max_position_embeddings: usize,
    /// Hidden dimension
    pub hidden_size: usize,
    /// Number of classification labels
    pub num_labels: usize,
    /// Sliding-window stride from the registry (default 256)
    pub stride: usize,
    /// Framework tag of the source checkpoint
    pub framework: &'static str,
    /// Whether the graph export completed
    pub onnx_converted: bool,
}

impl ModelMetadata {
    /// Build metadata for a converted token-classification model.
    #[must_use]
    pub fn new(model_id: &str, config: &ModelConfig, export_succeeded: bool) -> Self {
        Self {
            model_name: model_id.to_string(),
            model_type: config.model_type.clone(),
            task: "token-classification",
            max_position_embeddings: config.max_position_embeddings,
            hidden_size: config.hidden_size,
            num_labels: config.num_labels,
            stride: registry::stride_for(model_id),
            framework: "pt",
            onnx_converted: export_succeeded,
        }
    }
}

/// Copy every tokenizer file in the bundle into `dir`.
///
/// # Errors
///
/// Returns [`ConvertError::TokenizerSave`] if any copy fails.
pub fn save_tokenizer(bundle: &TokenizerBundle, dir: &Path) -> Result<()> {
    bundle
        .save_to(dir)
        .map_err(|err| ConvertError::TokenizerSave {
            message: err.to_string(),
        })
}

/// Write the field-preserving `config.json`.
///
/// # Errors
///
/// Returns [`ConvertError::MetadataSave`] on serialization or write failure.
pub fn save_config(config: &ModelConfig, dir: &Path) -> Result<()> {
    let json = config
        .to_pretty_json()
        .map_err(|err| ConvertError::MetadataSave {
            message: err.to_string(),
        })?;
    std::fs::write(dir.join(CONFIG_FILE), json).map_err(|err| ConvertError::MetadataSave {
        message: err.to_string(),
    })
}

/// Write `metadata.json`.
///
/// # Errors
///
/// Returns [`ConvertError::MetadataSave`] on serialization or write failure.
pub fn save_metadata(metadata: &ModelMetadata, dir: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(metadata).map_err(|err| ConvertError::MetadataSave {
            message: err.to_string(),
        })?;
    std::fs::write(dir.join(METADATA_FILE), json).map_err(|err| ConvertError::MetadataSave {
        message: err.to_string(),
    })
}
