//! Core library for cropping Dolby Vision RPU active area metadata.
//!
//! The heavy lifting (parsing and writing RPU binaries) is done by the
//! external `dovi_tool` program. This crate validates the job, exports the
//! level 5 active area presets to JSON, subtracts the requested crop from
//! every preset, writes the edited JSON and asks `dovi_tool` to re-embed it.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use dovi_crop_core::config::{CropJobBuilder, CropSpec};
//! use dovi_crop_core::external::CommandExecutor;
//! use dovi_crop_core::{CropOutcome, run_crop_job};
//!
//! let job = CropJobBuilder::new()
//!     .input("RPU.bin")
//!     .output("RPU_cropped.bin")
//!     .dovi_tool("/usr/local/bin/dovi_tool")
//!     .crop(CropSpec::new(0, 0, 280, 280))
//!     .build()
//!     .unwrap();
//!
//! let executor = CommandExecutor::new(job.dovi_tool());
//! if let CropOutcome::Written { output, .. } = run_crop_job(&job, &executor).unwrap() {
//!     println!("wrote {}", output.display());
//! }
//! ```

pub mod active_area;
pub mod config;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod validation;

// Re-exports for public API
pub use active_area::{ActiveAreaExport, ActiveAreaPreset, EditorDocument};
pub use config::{CropJob, CropJobBuilder, CropSpec, IntermediateFiles};
pub use error::{CoreError, CoreResult};
pub use pipeline::{CropOutcome, check_rpu, run_crop_job};
