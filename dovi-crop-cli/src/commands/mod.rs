//! Command implementations for the CLI.

/// Module containing the crop job: builds a `CropJob` from the arguments and
/// runs it against the real dovi_tool.
pub mod crop;
