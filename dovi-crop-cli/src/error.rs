// ============================================================================
// dovi-crop-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and exit codes for the CLI
//
// The CLI reuses the core error type. Every failure, whether it comes from
// argument parsing or from the pipeline, ends the process with exit code 1.

use dovi_crop_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for a successful run (including check-only and `--help`).
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for every validation, usage, subprocess or JSON error.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a clap parse result.
///
/// Help and version output are successes; every other clap error is a usage
/// error and maps to [`EXIT_FAILURE`] rather than clap's default of 2.
pub fn clap_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
