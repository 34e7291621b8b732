// ============================================================================
// dovi-crop-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CropJob
//
// Provides a fluent API for assembling a CropJob. Optional settings start at
// their defaults; the three paths are required and the mode is range-checked
// when the job is built.

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

// ---- Internal crate imports ----
use super::{CropJob, CropSpec, DEFAULT_MODE, MAX_MODE};
use crate::error::{CoreError, CoreResult};

/// Builder for creating CropJob instances.
///
/// # Examples
///
/// ```rust
/// use dovi_crop_core::config::{CropJobBuilder, CropSpec};
///
/// let job = CropJobBuilder::new()
///     .input("RPU.bin")
///     .output("RPU_cropped.bin")
///     .dovi_tool("dovi_tool")
///     .crop(CropSpec::new(0, 0, 280, 280))
///     .mode(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(job.crop().top, 280);
/// ```
#[derive(Debug, Clone)]
pub struct CropJobBuilder {
    // Required fields
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    dovi_tool: Option<PathBuf>,

    // Optional fields with defaults
    crop: CropSpec,
    mode: u8,
    check_only: bool,
    keep_intermediates: bool,
}

impl Default for CropJobBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CropJobBuilder {
    pub fn new() -> Self {
        Self {
            input: None,
            output: None,
            dovi_tool: None,
            crop: CropSpec::default(),
            mode: DEFAULT_MODE,
            check_only: false,
            keep_intermediates: false,
        }
    }

    /// Sets the input RPU file.
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets the output RPU file.
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the path to the dovi_tool executable.
    pub fn dovi_tool(mut self, dovi_tool: impl Into<PathBuf>) -> Self {
        self.dovi_tool = Some(dovi_tool.into());
        self
    }

    pub fn crop(mut self, crop: CropSpec) -> Self {
        self.crop = crop;
        self
    }

    /// Sets the dovi_tool editor mode (0-5).
    pub fn mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    /// Only check that the input RPU is usable, then stop.
    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// Keep the generated JSON files after a successful run.
    pub fn keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    /// Builds the CropJob.
    ///
    /// # Errors
    ///
    /// * `CoreError::FileError` - if input, output or dovi_tool were never set,
    ///   or if the output names the input file
    /// * `CoreError::ValueError` - if the mode is outside 0-5
    pub fn build(self) -> CoreResult<CropJob> {
        let input = self
            .input
            .ok_or_else(|| CoreError::FileError("An input RPU file is required".to_string()))?;
        let output = self
            .output
            .ok_or_else(|| CoreError::FileError("An output RPU file is required".to_string()))?;
        let dovi_tool = self
            .dovi_tool
            .ok_or_else(|| CoreError::FileError("A dovi_tool path is required".to_string()))?;
        if self.mode > MAX_MODE {
            return Err(CoreError::ValueError(format!(
                "'{}' is not a valid mode. (Valid modes are 0 to {MAX_MODE})",
                self.mode
            )));
        }
        // Re-embedding replaces the output, so it must not be the input
        if same_file(&input, &output) {
            return Err(CoreError::FileError(format!(
                "{} cannot be both the input and the output file",
                output.display()
            )));
        }

        Ok(CropJob {
            input,
            output,
            dovi_tool,
            crop: self.crop,
            mode: self.mode,
            check_only: self.check_only,
            keep_intermediates: self.keep_intermediates,
        })
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CropJobBuilder {
        CropJobBuilder::new()
            .input("in.bin")
            .output("out.bin")
            .dovi_tool("dovi_tool")
    }

    #[test]
    fn defaults_are_applied() {
        let job = base().build().unwrap();
        assert_eq!(job.mode(), DEFAULT_MODE);
        assert_eq!(job.crop(), CropSpec::default());
        assert!(!job.check_only());
        assert!(!job.keep_intermediates());
    }

    #[test]
    fn missing_required_paths_fail() {
        assert!(matches!(
            CropJobBuilder::new().output("o.bin").dovi_tool("t").build(),
            Err(CoreError::FileError(_))
        ));
        assert!(matches!(
            CropJobBuilder::new().input("i.bin").dovi_tool("t").build(),
            Err(CoreError::FileError(_))
        ));
        assert!(matches!(
            CropJobBuilder::new().input("i.bin").output("o.bin").build(),
            Err(CoreError::FileError(_))
        ));
    }

    #[test]
    fn mode_out_of_range_is_rejected() {
        assert!(matches!(base().mode(6).build(), Err(CoreError::ValueError(_))));
        assert_eq!(base().mode(5).build().unwrap().mode(), 5);
    }

    #[test]
    fn output_must_differ_from_input() {
        let err = base().output("in.bin").build().unwrap_err();
        assert!(matches!(err, CoreError::FileError(_)));

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("RPU.bin");
        std::fs::write(&input, b"rpu").unwrap();
        let aliased = dir.path().join(".").join("RPU.bin");
        let err = base().input(&input).output(&aliased).build().unwrap_err();
        assert!(matches!(err, CoreError::FileError(_)));
    }
}
