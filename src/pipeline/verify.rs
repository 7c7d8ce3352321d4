//! Post-hoc artifact verification and tokenizer-family classification.
//!
//! Verification inspects only which filenames exist in the output directory,
//! never file contents. The verdict is a hard gate: all required files must
//! be present and at least one vocabulary file must exist, since the
//! tokenizer cannot function without one.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use super::export::GRAPH_FILE;

/// JSON configuration file.
pub const CONFIG_FILE: &str = "config.json";

/// Tokenizer configuration file.
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// Required artifacts: serialized graph, config, tokenizer config.
pub const REQUIRED_FILES: &[&str] = &[GRAPH_FILE, CONFIG_FILE, TOKENIZER_CONFIG_FILE];

/// Vocabulary files, in classification priority order.
///
/// BERT-style: `vocab.txt`. RoBERTa/GPT-2 style: `vocab.json` (+ merges).
/// SentencePiece: `sentencepiece.bpe.model` or `tokenizer.model`.
pub const VOCAB_FILES: &[&str] = &[
    "vocab.txt",
    "vocab.json",
    "sentencepiece.bpe.model",
    "tokenizer.model",
];

/// Optional artifacts: reported when present, never required.
pub const OPTIONAL_FILES: &[&str] = &[
    "merges.txt",
    "tokenizer.json",
    "special_tokens_map.json",
    "added_tokens.json",
];

/// Vocabulary-encoding scheme, inferred from which filenames exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenizerFamily {
    /// WordPiece vocabulary (`vocab.txt`)
    BertStyle,
    /// Byte-level BPE vocabulary (`vocab.json`)
    RobertaStyle,
    /// SentencePiece model file
    SentencePiece,
    /// No recognized vocabulary file
    Unknown,
}

impl std::fmt::Display for TokenizerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BertStyle => "BERT-style",
            Self::RobertaStyle => "RoBERTa/GPT-2-style",
            Self::SentencePiece => "SentencePiece",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Classify the tokenizer family from the set of vocabulary filenames
/// present. Pure function of the filename set; priority
/// BERT > RoBERTa > SentencePiece > Unknown.
#[must_use]
pub fn classify_family(vocab_present: &BTreeSet<String>) -> TokenizerFamily {
    if vocab_present.contains("vocab.txt") {
        TokenizerFamily::BertStyle
    } else if vocab_present.contains("vocab.json") {
        TokenizerFamily::RobertaStyle
    } else if vocab_present.contains("sentencepiece.bpe.model")
        || vocab_present.contains("tokenizer.model")
    {
        TokenizerFamily::SentencePiece
    } else {
        TokenizerFamily::Unknown
    }
}

/// File-presence findings for one output directory.
///
/// Derived purely from directory contents; carries no hidden state.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    /// Required files found
    pub required_present: BTreeSet<String>,
    /// Required files not found
    pub required_missing: BTreeSet<String>,
    /// Vocabulary files found
    pub vocab_present: BTreeSet<String>,
    /// Optional files found
    pub optional_present: BTreeSet<String>,
    /// Classified tokenizer family
    pub tokenizer_family: TokenizerFamily,
}

impl ArtifactReport {
    /// Verdict: all required files present and at least one vocabulary file.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.required_missing.is_empty() && !self.vocab_present.is_empty()
    }

    /// Everything that blocks a pass, for error reporting.
    #[must_use]
    pub fn missing_summary(&self) -> Vec<String> {
        let mut missing: Vec<String> = self.required_missing.iter().cloned().collect();
        if self.vocab_present.is_empty() {
            missing.push("a vocabulary file".to_string());
        }
        missing
    }
}

/// Inspect `dir` and classify its artifacts.
///
/// The graph requirement is satisfied by `model.onnx` or by any other
/// `*.onnx` file, since a delegated backend may choose its own name.
#[must_use]
pub fn verify(dir: &Path) -> ArtifactReport {
    let mut required_present = BTreeSet::new();
    let mut required_missing = BTreeSet::new();

    match graph_file_in(dir) {
        Some(name) => {
            required_present.insert(name);
        }
        None => {
            required_missing.insert(GRAPH_FILE.to_string());
        }
    }

    for name in &[CONFIG_FILE, TOKENIZER_CONFIG_FILE] {
        if dir.join(name).is_file() {
            required_present.insert((*name).to_string());
        } else {
            required_missing.insert((*name).to_string());
        }
    }

    let vocab_present: BTreeSet<String> = VOCAB_FILES
        .iter()
        .filter(|name| dir.join(name).is_file())
        .map(|name| (*name).to_string())
        .collect();

    let optional_present: BTreeSet<String> = OPTIONAL_FILES
        .iter()
        .filter(|name| dir.join(name).is_file())
        .map(|name| (*name).to_string())
        .collect();

    let tokenizer_family = classify_family(&vocab_present);

    ArtifactReport {
        required_present,
        required_missing,
        vocab_present,
        optional_present,
        tokenizer_family,
    }
}

/// Find the serialized graph file: `model.onnx` preferred, else the first
/// `*.onnx` entry.
fn graph_file_in(dir: &Path) -> Option<String> {
    if dir.join(GRAPH_FILE).is_file() {
        return Some(GRAPH_FILE.to_string());
    }

    let entries = std::fs::read_dir(dir).ok()?;
    let mut onnx_files: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".onnx"))
        .collect();
    onnx_files.sort();
    onnx_files.into_iter().next()
}
