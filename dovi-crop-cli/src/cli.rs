// dovi-crop-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser};
use dovi_crop_core::CoreResult;
use dovi_crop_core::config::{CropSpec, DEFAULT_MODE, MAX_MODE};
use dovi_crop_core::validation::{
    validate_input_file, validate_non_negative_int, validate_output_file, validate_tool_path,
};
use std::ffi::OsString;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "dovi-crop",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    disable_version_flag = true,
    about = "dovi-crop: Crop the active area metadata of a Dolby Vision RPU",
    long_about = "Exports the level 5 active area presets of an RPU with dovi_tool, \
                  subtracts the requested crop from each preset and writes a new RPU."
)]
pub struct Cli {
    #[command(flatten)]
    pub crop: CropArgs,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: (),

    /// Print debug logging to stderr
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Also write log records to this file
    #[arg(long, value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CropArgs {
    /// Input file (i.e. RPU.bin)
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT", value_parser = parse_input_file)]
    pub input: PathBuf,

    /// Output file (i.e. RPU_out.bin)
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT", value_parser = parse_output_file)]
    pub output: PathBuf,

    /// Left crop
    #[arg(short = 'l', long = "left-crop", default_value = "0", allow_hyphen_values = true, value_parser = validate_non_negative_int)]
    pub left_crop: u32,

    /// Right crop
    #[arg(short = 'r', long = "right-crop", default_value = "0", allow_hyphen_values = true, value_parser = validate_non_negative_int)]
    pub right_crop: u32,

    /// Top crop
    #[arg(short = 't', long = "top-crop", default_value = "0", allow_hyphen_values = true, value_parser = validate_non_negative_int)]
    pub top_crop: u32,

    /// Bottom crop
    #[arg(short = 'b', long = "bottom-crop", default_value = "0", allow_hyphen_values = true, value_parser = validate_non_negative_int)]
    pub bottom_crop: u32,

    /// Set mode for RPU (0-5)
    #[arg(short = 'm', long, default_value_t = DEFAULT_MODE, value_parser = clap::value_parser!(u8).range(0..=MAX_MODE as i64))]
    pub mode: u8,

    /// Checks input RPU to see if it has valid metadata and exits the application
    #[arg(short = 'c', long = "check", default_value_t = false)]
    pub check: bool,

    /// Path to dovi_tool executable
    #[arg(short = 'd', long = "dovi-tool", required = true, value_name = "DOVI_TOOL", value_parser = parse_tool_path)]
    pub dovi_tool: PathBuf,

    /// Prevents removal of JSON files created during the job process
    #[arg(long = "no-clean-up", default_value_t = false)]
    pub no_clean_up: bool,
}

// clap value parsers need concrete `&str` signatures
fn parse_input_file(raw: &str) -> CoreResult<PathBuf> {
    validate_input_file(raw)
}

fn parse_output_file(raw: &str) -> CoreResult<PathBuf> {
    validate_output_file(raw)
}

fn parse_tool_path(raw: &str) -> CoreResult<PathBuf> {
    validate_tool_path(raw)
}

impl CropArgs {
    pub fn crop_spec(&self) -> CropSpec {
        CropSpec::new(self.left_crop, self.right_crop, self.top_crop, self.bottom_crop)
    }
}

/// Parses the process arguments.
pub fn parse_cli() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

/// Parses an explicit argument list (first item is the program name).
pub fn parse_cli_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use tempfile::tempdir;

    fn with_input<F: FnOnce(&str)>(f: F) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("RPU.bin");
        std::fs::write(&input, b"rpu").unwrap();
        f(input.to_str().unwrap());
    }

    #[test]
    fn defaults() {
        with_input(|input| {
            let cli = parse_cli_from(["dovi-crop", "-i", input, "-o", "out.bin", "-d", "dovi_tool"]).unwrap();
            assert_eq!(cli.crop.crop_spec(), CropSpec::default());
            assert_eq!(cli.crop.mode, 2);
            assert!(!cli.crop.check);
            assert!(!cli.crop.no_clean_up);
            assert!(!cli.verbose);
        });
    }

    #[test]
    fn all_flags() {
        with_input(|input| {
            let cli = parse_cli_from([
                "dovi-crop", "--input", input, "--output", "out.BIN", "--left-crop", "10",
                "-r", "12", "-t", "280", "-b", "282", "-m", "5", "-c", "--dovi-tool",
                "dovi_tool", "--no-clean-up", "--verbose",
            ])
            .unwrap();
            assert_eq!(cli.crop.crop_spec(), CropSpec::new(10, 12, 280, 282));
            assert_eq!(cli.crop.mode, 5);
            assert!(cli.crop.check);
            assert!(cli.crop.no_clean_up);
            assert!(cli.verbose);
        });
    }

    #[test]
    fn rejects_bad_crop_values() {
        with_input(|input| {
            for bad in ["-5", "abc", "1.5", ""] {
                let err = parse_cli_from([
                    "dovi-crop", "-i", input, "-o", "out.bin", "-d", "dovi_tool", "-l", bad,
                ])
                .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::ValueValidation, "{bad:?}");
            }
        });
    }

    #[test]
    fn rejects_out_of_range_mode() {
        with_input(|input| {
            let err = parse_cli_from(["dovi-crop", "-i", input, "-o", "out.bin", "-d", "dovi_tool", "-m", "6"])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        });
    }

    #[test]
    fn rejects_wrong_suffixes() {
        with_input(|input| {
            let err = parse_cli_from(["dovi-crop", "-i", input, "-o", "out.hevc", "-d", "dovi_tool"])
                .unwrap_err();
            assert!(err.to_string().contains("not a valid suffix"));
        });
        let err = parse_cli_from(["dovi-crop", "-i", "missing.bin", "-o", "out.bin", "-d", "dovi_tool"])
            .unwrap_err();
        assert!(err.to_string().contains("is not a valid input file"));
    }

    #[test]
    fn requires_dovi_tool() {
        with_input(|input| {
            let err = parse_cli_from(["dovi-crop", "-i", input, "-o", "out.bin"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        });
    }

    #[test]
    fn short_v_prints_version() {
        let err = parse_cli_from(["dovi-crop", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        let err = parse_cli_from(["dovi-crop", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}
