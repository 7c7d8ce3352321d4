//! Convert command implementation

use crate::cli::logging::{log, warn};
use crate::cli::{ConvertArgs, LogLevel};
use crate::hub::{HubClient, HubGraphExporter, HubProvider};
use crate::onnx::OnnxTracer;
use crate::pipeline::{resolver, ConversionRequest, ConversionResult, Pipeline};
use crate::registry;

/// The production pipeline: hub provider, hub delegated exporter, local tracer.
fn build_pipeline() -> Pipeline<HubProvider, HubGraphExporter, OnnxTracer> {
    let client = HubClient::new();
    Pipeline::new(
        HubProvider::with_client(client.clone()),
        HubGraphExporter::with_client(client),
        OnnxTracer::new(),
    )
}

pub fn run_convert(args: ConvertArgs, level: LogLevel) -> Result<(), String> {
    let output = resolver::resolve_output_dir(&args.model, args.output.as_deref())
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    log(level, LogLevel::Normal, &format!("Converting: {}", args.model));
    log(
        level,
        LogLevel::Normal,
        &format!("Output: {}", output.display()),
    );
    if args.quantize {
        log(
            level,
            LogLevel::Verbose,
            "  Quantization requested; this converter does not apply it",
        );
    }

    let request = ConversionRequest::new(args.model.as_str(), &output)
        .use_delegated(!args.manual)
        .quantize(args.quantize);

    let result = build_pipeline().run(&request);
    report_result(&args.model, &result, level)
}

pub fn run_convert_all(level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        "Converting all default models",
    );

    let pipeline = build_pipeline();
    let mut failures = 0usize;

    for (name, model_id) in registry::DEFAULT_MODELS {
        log(
            level,
            LogLevel::Normal,
            &format!("Converting: {model_id} ({name})"),
        );

        let output = match resolver::resolve_output_dir(model_id, None) {
            Ok(output) => output,
            Err(e) => {
                warn(level, &format!("failed to create output for {model_id}: {e}"));
                failures += 1;
                continue;
            }
        };

        let request = ConversionRequest::new(*model_id, &output);
        let result = pipeline.run(&request);
        if let Err(message) = report_result(model_id, &result, level) {
            warn(level, &message);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} conversions failed",
            registry::DEFAULT_MODELS.len()
        ));
    }
    Ok(())
}

/// Render one conversion result; `Err` carries the stage-tagged detail.
fn report_result(
    model_id: &str,
    result: &ConversionResult,
    level: LogLevel,
) -> Result<(), String> {
    if let Some(warning) = &result.fallback_warning {
        warn(
            level,
            &format!("delegated export failed ({warning}); used manual export"),
        );
    }
    if let Some(method) = result.export_method {
        log(level, LogLevel::Verbose, &format!("  Export path: {method}"));
    }

    if let Some(report) = &result.report {
        for file in &report.required_present {
            log(level, LogLevel::Verbose, &format!("  [ok] {file}"));
        }
        for file in report.vocab_present.iter().chain(&report.optional_present) {
            log(level, LogLevel::Verbose, &format!("  [ok] {file}"));
        }
        for file in &report.required_missing {
            log(level, LogLevel::Verbose, &format!("  [missing] {file}"));
        }
        log(
            level,
            LogLevel::Normal,
            &format!("  Tokenizer type: {}", report.tokenizer_family),
        );
    }

    if result.success {
        log(
            level,
            LogLevel::Normal,
            &format!("Conversion successful: {model_id}"),
        );
        Ok(())
    } else {
        let detail = result.error.as_deref().unwrap_or("unknown error");
        Err(format!(
            "conversion of {model_id} failed at {} stage: {detail}",
            result.stage
        ))
    }
}
