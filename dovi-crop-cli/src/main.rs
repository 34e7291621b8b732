//! Main entry point for the dovi-crop CLI application.
//!
//! Parses arguments, sets up logging, runs the crop job and maps the result
//! to an exit code: 0 on success, 1 on any error.

use dovi_crop_cli::error::{EXIT_FAILURE, clap_exit_code};
use dovi_crop_cli::logging::setup_logging;
use dovi_crop_cli::output::{outcome_message, print_error, print_success};
use dovi_crop_cli::{parse_cli, run_crop};

use std::process;

fn main() {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(clap_exit_code(&e));
        }
    };

    if let Err(e) = setup_logging(cli.verbose, cli.log_file.as_deref()) {
        print_error(&format!("{e:#}"));
        process::exit(EXIT_FAILURE);
    }

    match run_crop(&cli.crop) {
        Ok(outcome) => print_success(&outcome_message(&outcome)),
        Err(e) => {
            log::debug!("Crop job failed: {:?}", e);
            print_error(&e.to_string());
            process::exit(EXIT_FAILURE);
        }
    }
}
