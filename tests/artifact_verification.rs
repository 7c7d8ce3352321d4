//! Integration tests for output resolution and artifact verification.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use exportar::pipeline::{resolver, verify, TokenizerFamily};
use exportar::registry;

fn touch(dir: &std::path::Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"x").unwrap();
    }
}

#[test]
fn minilm_resolves_to_sanitized_identifier_directory() {
    let dir = resolver::derive_output_dir("sentence-transformers/all-MiniLM-L6-v2", None);
    assert_eq!(
        dir,
        PathBuf::from("./models/sentence-transformers_all-MiniLM-L6-v2")
    );
}

#[test]
fn minilm_bundle_with_vocab_txt_verifies_as_bert_style() {
    let out = TempDir::new().unwrap();
    touch(
        out.path(),
        &["model.onnx", "config.json", "tokenizer_config.json", "vocab.txt"],
    );

    let report = verify::verify(out.path());
    assert!(report.passed());
    assert_eq!(report.tokenizer_family, TokenizerFamily::BertStyle);
}

#[test]
fn distilbert_short_name_resolves_with_default_stride() {
    let dir = resolver::derive_output_dir("distilbert", None);
    assert_eq!(dir, PathBuf::from("./models/distilbert"));
    assert_eq!(registry::stride_for("distilbert"), 256);
}

#[test]
fn roberta_bundle_passes_with_merges_reported_optional() {
    let out = TempDir::new().unwrap();
    touch(
        out.path(),
        &[
            "model.onnx",
            "config.json",
            "tokenizer_config.json",
            "vocab.json",
            "merges.txt",
        ],
    );

    let report = verify::verify(out.path());
    assert!(report.passed());
    assert_eq!(report.tokenizer_family, TokenizerFamily::RobertaStyle);
    assert!(report.optional_present.contains("merges.txt"));
    assert!(!report.required_present.contains("merges.txt"));
}

#[test]
fn verification_requires_all_three_required_files_and_a_vocab() {
    let out = TempDir::new().unwrap();
    touch(out.path(), &["model.onnx", "config.json", "vocab.txt"]);

    let report = verify::verify(out.path());
    assert!(!report.passed());
    assert!(report.required_missing.contains("tokenizer_config.json"));

    touch(out.path(), &["tokenizer_config.json"]);
    assert!(verify::verify(out.path()).passed());
}

#[test]
fn registry_resolution_is_independent_of_filesystem_state() {
    let before = resolver::derive_output_dir("mirth/chonky_modernbert_large_1", None);
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("models").join("modernbert-large")).unwrap();
    let after = resolver::derive_output_dir("mirth/chonky_modernbert_large_1", None);
    assert_eq!(before, after);
    assert_eq!(before, PathBuf::from("./models/modernbert-large"));
}
