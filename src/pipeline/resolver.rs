//! Output directory resolution.
//!
//! Resolution is deterministic: an explicit override wins, then a registry
//! short name, then a name derived from the identifier itself. Nothing here
//! depends on pre-existing filesystem state; `resolve_output_dir` creates the
//! directory if it is absent.

use std::io;
use std::path::{Path, PathBuf};

use crate::registry;

/// Base directory for registry-derived and identifier-derived outputs.
const MODELS_BASE: &str = "./models";

/// Derive the output directory for a model without touching the filesystem.
#[must_use]
pub fn derive_output_dir(model_id: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match registry::short_name_for(model_id) {
        Some(short) => Path::new(MODELS_BASE).join(short),
        None => Path::new(MODELS_BASE).join(model_id.replace('/', "_")),
    }
}

/// Derive the output directory and create it if missing.
///
/// # Errors
///
/// Returns an error only for filesystem failures (permissions, read-only
/// mounts).
pub fn resolve_output_dir(model_id: &str, explicit: Option<&Path>) -> io::Result<PathBuf> {
    let dir = derive_output_dir(model_id, explicit);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
