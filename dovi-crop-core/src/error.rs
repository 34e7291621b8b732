// ============================================================================
// dovi-crop-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the crop pipeline
//
// Every failure in the pipeline is fatal to the job, so a single flat enum
// is enough. Variants are grouped by the condition that produced them rather
// than by the module that raised them.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors produced while validating arguments or running a crop job.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad input/output path or suffix.
    #[error("{0}")]
    FileError(String),

    /// Non-digit crop input, out of range mode, or a negative crop result.
    #[error("{0}")]
    ValueError(String),

    /// Required key missing from the exported document.
    #[error("{0}")]
    KeyError(String),

    /// The input RPU is unusable (e.g. zero bytes).
    #[error("{0}")]
    RpuError(String),

    /// Exported JSON missing or malformed, or the edited JSON was not written.
    #[error("{0}")]
    JsonError(String),

    /// dovi_tool exited non-zero or did not produce its expected output.
    #[error("{0}")]
    ExternalTool(String),

    /// dovi_tool could not be started at all.
    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for dovi-crop operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `JsonError` for a document that could not be read or parsed.
pub(crate) fn json_processing_error(path: &Path, cause: impl std::fmt::Display) -> CoreError {
    CoreError::JsonError(format!(
        "Error processing JSON file '{}': {}",
        path.display(),
        cause
    ))
}

/// Builds a `CommandStart` error for a tool that failed to spawn.
pub(crate) fn command_start_error(program: &Path, err: io::Error) -> CoreError {
    CoreError::CommandStart(program.display().to_string(), err)
}
