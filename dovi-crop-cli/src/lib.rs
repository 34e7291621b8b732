// dovi-crop-cli/src/lib.rs
//
// Library portion of the dovi-crop CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, CropArgs, parse_cli, parse_cli_from};
pub use commands::crop::run_crop;
