//! Data types shared by the hub provider and the pipeline.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::pipeline::{ConvertError, Result};

/// Model weights file the provider materializes. SafeTensors only; PyTorch
/// pickle checkpoints are refused.
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Tokenizer artifact filenames the provider looks for, canonical names.
pub const TOKENIZER_FILES: &[&str] = &[
    "tokenizer_config.json",
    "tokenizer.json",
    "vocab.txt",
    "vocab.json",
    "merges.txt",
    "special_tokens_map.json",
    "added_tokens.json",
    "sentencepiece.bpe.model",
    "tokenizer.model",
];

/// Loaded model configuration.
///
/// Keeps the raw JSON value so `config.json` can be re-persisted without
/// losing fields this tool does not interpret, alongside the typed fields
/// the pipeline needs.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    raw: Value,
    /// Architecture family (`distilbert`, `modernbert`, ...)
    pub model_type: String,
    /// Hidden dimension
    pub hidden_size: usize,
    /// Maximum sequence length
    pub max_position_embeddings: usize,
    /// Number of classification labels
    pub num_labels: usize,
}

impl ModelConfig {
    /// Extract the typed fields from a raw `config.json` value.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ConfigParse`] when `model_type`,
    /// `hidden_size`/`dim`, or `max_position_embeddings` are absent.
    pub fn from_json(raw: Value) -> Result<Self> {
        let model_type = raw
            .get("model_type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::ConfigParse {
                message: "missing model_type".into(),
            })?
            .to_string();

        // DistilBERT configs carry `dim` instead of `hidden_size`.
        let hidden_size = usize_field(&raw, "hidden_size")
            .or_else(|| usize_field(&raw, "dim"))
            .ok_or_else(|| ConvertError::ConfigParse {
                message: "missing hidden_size".into(),
            })?;

        let max_position_embeddings =
            usize_field(&raw, "max_position_embeddings").ok_or_else(|| {
                ConvertError::ConfigParse {
                    message: "missing max_position_embeddings".into(),
                }
            })?;

        // transformers defaults to two labels when only id2label is present.
        let num_labels = usize_field(&raw, "num_labels")
            .or_else(|| {
                raw.get("id2label")
                    .and_then(Value::as_object)
                    .map(serde_json::Map::len)
            })
            .unwrap_or(2);

        Ok(Self {
            raw,
            model_type,
            hidden_size,
            max_position_embeddings,
            num_labels,
        })
    }

    /// Parse a `config.json` file from disk.
    ///
    /// # Errors
    ///
    /// Propagates IO and JSON errors, plus [`ConvertError::ConfigParse`] for
    /// missing fields.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Self::from_json(raw)
    }

    /// Render the full configuration, preserving uninterpreted fields.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.raw)?)
    }

    /// Label id -> label name map, when the configuration carries one.
    #[must_use]
    pub fn id2label(&self) -> Option<BTreeMap<String, String>> {
        let map = self.raw.get("id2label")?.as_object()?;
        Some(
            map.iter()
                .map(|(id, label)| {
                    (
                        id.clone(),
                        label.as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect(),
        )
    }
}

fn usize_field(raw: &Value, key: &str) -> Option<usize> {
    raw.get(key)?.as_u64().map(|v| v as usize)
}

/// Tokenizer artifact files found for a model: canonical filename plus the
/// local path the file was materialized at.
#[derive(Debug, Clone)]
pub struct TokenizerBundle {
    files: Vec<(String, PathBuf)>,
}

impl TokenizerBundle {
    /// Build a bundle from `(canonical name, local path)` pairs.
    #[must_use]
    pub fn from_files(files: Vec<(String, PathBuf)>) -> Self {
        Self { files }
    }

    /// Canonical filenames in the bundle.
    #[must_use]
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of files in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the bundle holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Copy every file into `dir` under its canonical name.
    ///
    /// # Errors
    ///
    /// Returns the first copy failure; earlier copies are not rolled back.
    pub fn save_to(&self, dir: &Path) -> io::Result<()> {
        for (name, src) in &self.files {
            std::fs::copy(src, dir.join(name))?;
        }
        Ok(())
    }
}

/// A model ready for export: identifier, configuration, and local weights.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Identifier the model was requested with
    pub model_id: String,
    /// Parsed configuration
    pub config: ModelConfig,
    /// Local SafeTensors weights, when materialized
    pub weights_path: Option<PathBuf>,
}
