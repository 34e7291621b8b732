//! Implementation of the crop run.
//!
//! Turns the parsed arguments into a `CropJob`, wires up the process-backed
//! dovi_tool executor and delegates to dovi-crop-core.

use crate::cli::CropArgs;
use crate::error::CliResult;

use dovi_crop_core::external::{CommandExecutor, DoviToolExecutor, check_dependency};
use dovi_crop_core::{CropJob, CropJobBuilder, CropOutcome, run_crop_job};

use log::{debug, info, warn};

/// Builds the job described by the command-line arguments.
pub fn build_job(args: &CropArgs) -> CliResult<CropJob> {
    CropJobBuilder::new()
        .input(&args.input)
        .output(&args.output)
        .dovi_tool(&args.dovi_tool)
        .crop(args.crop_spec())
        .mode(args.mode)
        .check_only(args.check)
        .keep_intermediates(args.no_clean_up)
        .build()
}

/// Runs a crop job with the given executor.
pub fn run_with_executor<E: DoviToolExecutor + ?Sized>(
    args: &CropArgs,
    executor: &E,
) -> CliResult<CropOutcome> {
    let job = build_job(args)?;
    info!("Input: {}", job.input().display());
    info!("Output: {}", job.output().display());
    info!("Crop: {:?}, mode: {}", job.crop(), job.mode());

    if !job.check_only() && log::log_enabled!(log::Level::Debug) {
        // Diagnostic only; a broken tool surfaces again on export
        match check_dependency(executor) {
            Ok(Some(version)) => debug!("Using {}", version),
            Ok(None) => {}
            Err(e) => warn!("Could not query dovi_tool version: {}", e),
        }
    }

    run_crop_job(&job, executor)
}

/// Runs a crop job against the dovi_tool named on the command line.
pub fn run_crop(args: &CropArgs) -> CliResult<CropOutcome> {
    let executor = CommandExecutor::new(&args.dovi_tool);
    run_with_executor(args, &executor)
}
