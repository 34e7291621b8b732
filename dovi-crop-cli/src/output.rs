//! Final status lines printed to the terminal.
//!
//! Success goes to stdout and errors to stderr, one line each. Colors are
//! applied only when the target stream is a terminal.

use console::style;
use dovi_crop_core::CropOutcome;

pub const SUCCESS_SYMBOL: &str = "✓";
pub const ERROR_SYMBOL: &str = "✗";

/// Text of the success line for a finished job.
pub fn outcome_message(outcome: &CropOutcome) -> String {
    match outcome {
        CropOutcome::Checked { .. } => "RPU is valid".to_string(),
        CropOutcome::Written { output, retained } if retained.is_empty() => {
            format!("Modified RPU written to {}", output.display())
        }
        CropOutcome::Written { output, retained } => format!(
            "Modified RPU written to {} (kept {})",
            output.display(),
            retained
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", style(SUCCESS_SYMBOL).green().bold(), message);
}

/// Text of the error line. Messages that already open with "Error" are not
/// prefixed a second time.
pub fn error_message(message: &str) -> String {
    if message.starts_with("Error ") || message.starts_with("Error:") {
        message.to_string()
    } else {
        format!("Error: {message}")
    }
}

pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        style(ERROR_SYMBOL).red().bold().for_stderr(),
        style(error_message(message)).for_stderr()
    );
}
