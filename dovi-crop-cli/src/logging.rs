// ============================================================================
// dovi-crop-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern dispatch for console and optional log file
//
// The console shows warnings and errors by default, which includes the last
// stderr line of a failed dovi_tool run. `--verbose` lowers it to debug and
// `--log-file` appends every record at debug level to a file.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::Path;

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Console level for the given verbosity.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger.
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let console = fern::Dispatch::new()
        .level(console_level(verbose))
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                get_timestamp(),
                record.level(),
                message
            ))
        })
        .level(LevelFilter::Debug)
        .chain(console);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = fern::log_file(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        dispatch = dispatch.chain(fern::Dispatch::new().level(LevelFilter::Debug).chain(file));
    }

    dispatch.apply().context("Failed to initialize logging")?;
    log::debug!("Logger initialized (verbose: {})", verbose);
    Ok(())
}
