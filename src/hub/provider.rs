//! Model-and-tokenizer provider: the trait seam the pipeline consumes, and
//! its hub-backed implementation.

use serde_json::Value;

use crate::pipeline::{ConvertError, Result};

use super::client::HubClient;
use super::types::{LoadedModel, ModelConfig, TokenizerBundle, TOKENIZER_FILES, WEIGHTS_FILE};

/// Yields a loadable configuration, model, and tokenizer for an identifier.
///
/// The pipeline depends only on the success/failure outcome and the returned
/// artifacts, never on how they were obtained.
pub trait ModelProvider {
    /// Load and parse the model configuration.
    ///
    /// # Errors
    ///
    /// Any fetch or parse failure; tagged as the Config stage by the runner.
    fn load_config(&self, model_id: &str) -> Result<ModelConfig>;

    /// Materialize the model weights locally.
    ///
    /// # Errors
    ///
    /// Any fetch failure; tagged as the ModelLoad stage by the runner.
    fn load_model(&self, model_id: &str, config: &ModelConfig) -> Result<LoadedModel>;

    /// Collect the tokenizer artifact files.
    ///
    /// # Errors
    ///
    /// Fails when the repository has no tokenizer files at all.
    fn load_tokenizer(&self, model_id: &str) -> Result<TokenizerBundle>;
}

/// Hub-backed provider.
#[derive(Clone, Default)]
pub struct HubProvider {
    client: HubClient,
}

impl HubProvider {
    /// Create a provider with environment-resolved authentication.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: HubClient::new(),
        }
    }

    /// Create a provider over an existing client.
    #[must_use]
    pub fn with_client(client: HubClient) -> Self {
        Self { client }
    }
}

impl ModelProvider for HubProvider {
    fn load_config(&self, model_id: &str) -> Result<ModelConfig> {
        let path = self.client.fetch(model_id, "config.json")?;
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        ModelConfig::from_json(raw)
    }

    fn load_model(&self, model_id: &str, config: &ModelConfig) -> Result<LoadedModel> {
        let weights_path = match self.client.fetch(model_id, WEIGHTS_FILE) {
            Ok(path) => path,
            Err(ConvertError::FileNotFound { .. }) => {
                // No SafeTensors. A pickle checkpoint may exist, but loading
                // one is refused rather than attempted.
                if self.client.fetch(model_id, "pytorch_model.bin").is_ok() {
                    return Err(ConvertError::PickleWeights {
                        repo: model_id.to_string(),
                    });
                }
                return Err(ConvertError::FileNotFound {
                    repo: model_id.to_string(),
                    file: WEIGHTS_FILE.to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        Ok(LoadedModel {
            model_id: model_id.to_string(),
            config: config.clone(),
            weights_path: Some(weights_path),
        })
    }

    fn load_tokenizer(&self, model_id: &str) -> Result<TokenizerBundle> {
        let mut files = Vec::new();
        for name in TOKENIZER_FILES {
            match self.client.fetch(model_id, name) {
                Ok(path) => files.push(((*name).to_string(), path)),
                Err(ConvertError::FileNotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }

        if files.is_empty() {
            return Err(ConvertError::Hub {
                repo: model_id.to_string(),
                message: "no tokenizer files found".into(),
            });
        }

        Ok(TokenizerBundle::from_files(files))
    }
}
