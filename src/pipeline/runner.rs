//! Pipeline orchestrator.
//!
//! Linear stage machine with no back-edges:
//! `Config -> ModelLoad -> Export -> TokenizerSave -> MetadataSave -> Verify`.
//! Each transition requires the prior stage's success; the first failure is
//! terminal and carries the stage identifier and error detail. Verification
//! failing is itself a terminal failure even though every write succeeded.

use crate::hub::ModelProvider;

use super::artifacts::{self, ModelMetadata};
use super::error::ConvertError;
use super::export::{run_export, GraphExporter, GraphTracer};
use super::request::{ConversionRequest, ConversionResult, Stage};
use super::verify;

/// The conversion pipeline, assembled from its collaborator capabilities.
///
/// All state is per-invocation; a `Pipeline` may be reused across requests
/// (the batch mode runs one request per registry entry against the same
/// instance).
pub struct Pipeline<P, D, T> {
    provider: P,
    delegated: D,
    tracer: T,
}

impl<P, D, T> Pipeline<P, D, T>
where
    P: ModelProvider,
    D: GraphExporter,
    T: GraphTracer,
{
    /// Assemble a pipeline from a model provider and the two export
    /// capabilities.
    pub fn new(provider: P, delegated: D, tracer: T) -> Self {
        Self {
            provider,
            delegated,
            tracer,
        }
    }

    /// Run one conversion. Never panics; every failure comes back as a
    /// stage-tagged [`ConversionResult`].
    pub fn run(&self, request: &ConversionRequest) -> ConversionResult {
        let model_id = request.model_id.as_str();

        let config = match self.provider.load_config(model_id) {
            Ok(config) => config,
            Err(err) => {
                return ConversionResult::failure(
                    Stage::Config,
                    ConvertError::ConfigLoad {
                        model: model_id.to_string(),
                        message: err.to_string(),
                    },
                )
            }
        };

        let model = match self.provider.load_model(model_id, &config) {
            Ok(model) => model,
            Err(err) => {
                return ConversionResult::failure(
                    Stage::ModelLoad,
                    ConvertError::ModelLoad {
                        model: model_id.to_string(),
                        message: err.to_string(),
                    },
                )
            }
        };
        let tokenizer = match self.provider.load_tokenizer(model_id) {
            Ok(tokenizer) => tokenizer,
            Err(err) => {
                return ConversionResult::failure(
                    Stage::ModelLoad,
                    ConvertError::ModelLoad {
                        model: model_id.to_string(),
                        message: err.to_string(),
                    },
                )
            }
        };

        let outcome = match run_export(
            &self.delegated,
            &self.tracer,
            &model,
            &request.output_dir,
            request.use_delegated,
        ) {
            Ok(outcome) => outcome,
            Err(err) => return ConversionResult::failure(Stage::Export, err),
        };

        if let Err(err) = artifacts::save_tokenizer(&tokenizer, &request.output_dir) {
            return ConversionResult::failure(Stage::TokenizerSave, err)
                .with_export(outcome.method, outcome.fallback_warning);
        }

        let metadata = ModelMetadata::new(model_id, &config, true);
        if let Err(err) = artifacts::save_config(&config, &request.output_dir)
            .and_then(|()| artifacts::save_metadata(&metadata, &request.output_dir))
        {
            return ConversionResult::failure(Stage::MetadataSave, err)
                .with_export(outcome.method, outcome.fallback_warning);
        }

        let report = verify::verify(&request.output_dir);
        if !report.passed() {
            let err = ConvertError::VerificationIncomplete {
                missing: report.missing_summary(),
            };
            let mut result = ConversionResult::failure(Stage::Verify, err)
                .with_export(outcome.method, outcome.fallback_warning);
            result.report = Some(report);
            return result;
        }

        ConversionResult {
            success: true,
            stage: Stage::Verify,
            error: None,
            export_method: Some(outcome.method),
            fallback_warning: outcome.fallback_warning,
            report: Some(report),
        }
    }
}
