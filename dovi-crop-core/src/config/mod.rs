//! Configuration structures and constants for the dovi-crop-core library.
//!
//! A crop run is described by a single immutable [`CropJob`], normally created
//! by the CLI through [`CropJobBuilder`] and handed to
//! [`crate::pipeline::run_crop_job`].

mod builder;

use std::path::{Path, PathBuf};

pub use builder::CropJobBuilder;

// Default constants

/// Default dovi_tool editor mode written into the edited JSON.
pub const DEFAULT_MODE: u8 = 2;

/// Highest mode accepted by the dovi_tool editor.
pub const MAX_MODE: u8 = 5;

/// File extension required for input and output RPU files (compared case-insensitively).
pub const RPU_EXTENSION: &str = "bin";

/// Suffix appended to the output stem for the exported active area JSON.
pub const EXPORT_JSON_SUFFIX: &str = "_exp_ar.json";

/// Suffix appended to the output stem for the crop-adjusted JSON.
pub const CROP_JSON_SUFFIX: &str = "_crop_ar.json";

/// Crop offsets subtracted from every active area preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CropSpec {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl CropSpec {
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Returns true when no edge is cropped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

/// Everything needed to run one crop job.
///
/// Fields are private so a job can only be created through
/// [`CropJobBuilder`], which enforces the required paths and mode range.
#[derive(Debug, Clone)]
pub struct CropJob {
    pub(crate) input: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) dovi_tool: PathBuf,
    pub(crate) crop: CropSpec,
    pub(crate) mode: u8,
    pub(crate) check_only: bool,
    pub(crate) keep_intermediates: bool,
}

impl CropJob {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn dovi_tool(&self) -> &Path {
        &self.dovi_tool
    }

    pub fn crop(&self) -> CropSpec {
        self.crop
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    pub fn check_only(&self) -> bool {
        self.check_only
    }

    pub fn keep_intermediates(&self) -> bool {
        self.keep_intermediates
    }

    /// Paths of the JSON files the pipeline generates next to the output.
    pub fn intermediate_files(&self) -> IntermediateFiles {
        IntermediateFiles::for_output(&self.output)
    }
}

/// The two JSON files generated during a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateFiles {
    /// `<output-stem>_exp_ar.json`, written by `dovi_tool export`
    pub export_json: PathBuf,
    /// `<output-stem>_crop_ar.json`, the edited document fed to `dovi_tool editor`
    pub crop_json: PathBuf,
}

impl IntermediateFiles {
    pub fn for_output(output: &Path) -> Self {
        Self {
            export_json: sibling_with_suffix(output, EXPORT_JSON_SUFFIX),
            crop_json: sibling_with_suffix(output, CROP_JSON_SUFFIX),
        }
    }

    pub fn as_array(&self) -> [&Path; 2] {
        [&self.export_json, &self.crop_json]
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intermediate_names_derive_from_output_stem() {
        let files = IntermediateFiles::for_output(Path::new("/media/movie_out.bin"));
        assert_eq!(files.export_json, PathBuf::from("/media/movie_out_exp_ar.json"));
        assert_eq!(files.crop_json, PathBuf::from("/media/movie_out_crop_ar.json"));
    }

    #[test]
    fn intermediate_names_for_relative_output() {
        let files = IntermediateFiles::for_output(Path::new("RPU.BIN"));
        assert_eq!(files.export_json, PathBuf::from("RPU_exp_ar.json"));
        assert_eq!(files.crop_json, PathBuf::from("RPU_crop_ar.json"));
    }

    #[test]
    fn crop_spec_empty() {
        assert!(CropSpec::default().is_empty());
        assert!(!CropSpec::new(0, 0, 0, 1).is_empty());
    }
}
