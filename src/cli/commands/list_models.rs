//! List-models command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::registry;

pub fn run_list_models(level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, "Available default models:");
    for (name, model_id) in registry::DEFAULT_MODELS {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  {name:20} -> {model_id:42} (stride: {})",
                registry::stride_for(model_id)
            ),
        );
    }
    Ok(())
}
