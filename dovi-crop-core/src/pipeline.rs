// ============================================================================
// dovi-crop-core/src/pipeline.rs
// ============================================================================
//
// CROP PIPELINE: check -> export -> crop -> mode -> write -> re-embed -> cleanup
//
// Each step runs only if the previous one succeeded. A failure returns
// immediately and skips cleanup, so intermediate files written before the
// failure stay on disk for inspection.

use crate::active_area::{ActiveAreaExport, EditorDocument};
use crate::config::{CropJob, IntermediateFiles};
use crate::error::{CoreError, CoreResult};
use crate::external::{DoviToolExecutor, export_active_area, reembed_rpu};
use std::io;
use std::path::{Path, PathBuf};

/// How a crop job finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropOutcome {
    /// Check-only run: the input RPU looked valid and nothing else was done.
    Checked { input: PathBuf },
    /// The cropped RPU was written.
    Written {
        output: PathBuf,
        /// Intermediate JSON files left on disk (empty unless retention was requested)
        retained: Vec<PathBuf>,
    },
}

/// Fails if the RPU file is empty.
///
/// An empty file is always fatal, whether or not the job is check-only.
pub fn check_rpu(path: &Path) -> CoreResult<u64> {
    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Err(CoreError::RpuError(format!(
            "{name} is 0 bytes, this indicates a broken RPU file"
        )));
    }
    log::debug!("{} is {} bytes", path.display(), size);
    Ok(size)
}

/// Runs a crop job from start to finish.
pub fn run_crop_job<E: DoviToolExecutor + ?Sized>(
    job: &CropJob,
    executor: &E,
) -> CoreResult<CropOutcome> {
    check_rpu(job.input())?;
    if job.check_only() {
        log::info!("{} passed the RPU check", job.input().display());
        return Ok(CropOutcome::Checked {
            input: job.input().to_path_buf(),
        });
    }

    let files = job.intermediate_files();
    for path in files.as_array() {
        remove_stale(path)?;
    }

    let export_json = export_active_area(executor, job.input(), &files.export_json)?;

    let mut export = ActiveAreaExport::load(&export_json)?;
    export.apply_crop(job.crop())?;
    let document = EditorDocument::new(export, job.mode());

    log::info!("Writing cropped active area JSON to {}", files.crop_json.display());
    let crop_json = document.write(&files.crop_json)?;

    remove_stale(job.output())?;
    let output = reembed_rpu(executor, job.input(), &crop_json, job.output())?;
    log::info!("Modified RPU written to {}", output.display());

    let retained = if job.keep_intermediates() {
        log::info!("Keeping intermediate files");
        files.as_array().iter().map(|p| p.to_path_buf()).collect()
    } else {
        clean_up(&files);
        Vec::new()
    };

    Ok(CropOutcome::Written { output, retained })
}

/// Removes a file left by an earlier run; a missing file is fine.
fn remove_stale(path: &Path) -> CoreResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Deletes the generated JSON files. Missing files are ignored and other
/// failures are only logged; the input RPU is never touched.
pub fn clean_up(files: &IntermediateFiles) {
    for path in files.as_array() {
        match std::fs::remove_file(path) {
            Ok(()) => log::debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
