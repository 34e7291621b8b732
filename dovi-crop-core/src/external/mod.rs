// ============================================================================
// dovi-crop-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with dovi_tool
//
// This module encapsulates every interaction with the external dovi_tool
// binary. Process execution sits behind the DoviToolExecutor trait so the
// pipeline can be driven by a mock in tests; the functions that build the
// argument templates and check the tool's results live in `dovi_tool`.
//
// KEY COMPONENTS:
// - DoviToolExecutor trait and the std::process backed CommandExecutor
// - export_active_area / reembed_rpu: the two subcommands the pipeline needs
// - check_dependency: best-effort version probe for diagnostics

// ---- Internal crate imports ----
use crate::error::CoreResult;
use std::ffi::OsString;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Argument templates and result checks for the dovi_tool subcommands
pub mod dovi_tool;

/// Trait and process-backed implementation for running dovi_tool
pub mod executor;

/// Mock executor for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use dovi_tool::{export_active_area, reembed_rpu};
pub use executor::{CommandExecutor, DoviToolExecutor, ToolOutput};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Asks dovi_tool for its version.
///
/// Returns the first line of its stdout when the tool ran successfully, or
/// `None` when it exited non-zero. A tool that cannot be started at all is
/// reported as an error so the caller can fail early with a clear message.
pub fn check_dependency<E: DoviToolExecutor + ?Sized>(executor: &E) -> CoreResult<Option<String>> {
    let output = executor.execute(&[OsString::from("--version")])?;
    if !output.success() {
        log::warn!(
            "'{} --version' exited with {}",
            executor.program().display(),
            output.describe_status()
        );
        return Ok(None);
    }
    let version = output.stdout.lines().next().map(|line| line.trim().to_string());
    if let Some(version) = &version {
        log::debug!("Found dependency: {}", version);
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockDoviTool;

    #[test]
    fn check_dependency_reports_first_stdout_line() {
        let tool = MockDoviTool::new();
        tool.set_version_output("dovi_tool 2.1.2\nextra line");
        assert_eq!(check_dependency(&tool).unwrap().as_deref(), Some("dovi_tool 2.1.2"));
    }

    #[test]
    fn check_dependency_tolerates_failed_probe() {
        let tool = MockDoviTool::new();
        tool.fail_subcommand("--version", 2);
        assert_eq!(check_dependency(&tool).unwrap(), None);
    }
}
