//! Error types for the conversion pipeline.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting a checkpoint.
///
/// Each variant maps onto one pipeline stage, so the orchestrator can tag a
/// failure with where it happened. Only the delegated-export failure is
/// recoverable: it triggers the manual fallback instead of ending the run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Model configuration could not be loaded or parsed
    #[error("failed to load configuration for {model}: {message}")]
    ConfigLoad { model: String, message: String },

    /// Model weights or tokenizer could not be loaded
    #[error("failed to load model {model}: {message}")]
    ModelLoad { model: String, message: String },

    /// The delegated export backend failed (recoverable via manual export)
    #[error("delegated export failed: {message}")]
    DelegatedExport { message: String },

    /// Manual trace export failed (fatal, no further fallback)
    #[error("manual export failed: {message}")]
    ManualExport { message: String },

    /// Tokenizer files could not be persisted
    #[error("failed to save tokenizer: {message}")]
    TokenizerSave { message: String },

    /// Configuration or metadata could not be persisted
    #[error("failed to save metadata: {message}")]
    MetadataSave { message: String },

    /// Post-hoc verification found required artifacts missing
    #[error("verification incomplete: missing {}", .missing.join(", "))]
    VerificationIncomplete { missing: Vec<String> },

    /// Model configuration is malformed
    #[error("failed to parse config.json: {message}")]
    ConfigParse { message: String },

    /// Hub request failed
    #[error("hub error for {repo}: {message}")]
    Hub { repo: String, message: String },

    /// File not found in the model repository
    #[error("file not found in {repo}: {file}")]
    FileNotFound { repo: String, file: String },

    /// PyTorch pickle weights are refused
    #[error("refusing PyTorch .bin weights for {repo}: pickle files may execute arbitrary code")]
    PickleWeights { repo: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Check whether the export fallback can recover from this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DelegatedExport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegated_export_is_recoverable() {
        let err = ConvertError::DelegatedExport {
            message: "backend unavailable".into(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_manual_export_is_fatal() {
        let err = ConvertError::ManualExport {
            message: "trace failed".into(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_verification_incomplete_lists_missing_files() {
        let err = ConvertError::VerificationIncomplete {
            missing: vec!["config.json".into(), "vocab.txt".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("config.json, vocab.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConvertError = io_err.into();
        assert!(matches!(err, ConvertError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_all_variants_display() {
        let errors: Vec<ConvertError> = vec![
            ConvertError::ConfigLoad {
                model: "m".into(),
                message: "bad json".into(),
            },
            ConvertError::ModelLoad {
                model: "m".into(),
                message: "no weights".into(),
            },
            ConvertError::DelegatedExport { message: "x".into() },
            ConvertError::ManualExport { message: "x".into() },
            ConvertError::TokenizerSave { message: "x".into() },
            ConvertError::MetadataSave { message: "x".into() },
            ConvertError::VerificationIncomplete {
                missing: vec!["vocab.txt".into()],
            },
            ConvertError::Hub {
                repo: "org/name".into(),
                message: "404".into(),
            },
            ConvertError::FileNotFound {
                repo: "org/name".into(),
                file: "config.json".into(),
            },
            ConvertError::PickleWeights { repo: "org/name".into() },
        ];

        for err in errors {
            assert!(!err.to_string().is_empty(), "empty display for {err:?}");
        }
    }
}
