//! Verify command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, VerifyArgs};
use crate::pipeline::verify;

pub fn run_verify(args: VerifyArgs, level: LogLevel) -> Result<(), String> {
    if !args.dir.is_dir() {
        return Err(format!("not a directory: {}", args.dir.display()));
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Verifying: {}", args.dir.display()),
    );

    let report = verify::verify(&args.dir);

    for file in &report.required_present {
        log(level, LogLevel::Normal, &format!("  [ok] {file}"));
    }
    for file in report.vocab_present.iter().chain(&report.optional_present) {
        log(level, LogLevel::Normal, &format!("  [ok] {file}"));
    }
    for file in &report.required_missing {
        log(level, LogLevel::Normal, &format!("  [missing] {file}"));
    }

    log(
        level,
        LogLevel::Normal,
        &format!("  Tokenizer type: {}", report.tokenizer_family),
    );

    if report.passed() {
        log(level, LogLevel::Normal, "Verification passed");
        Ok(())
    } else {
        Err(format!(
            "verification failed: missing {}",
            report.missing_summary().join(", ")
        ))
    }
}
