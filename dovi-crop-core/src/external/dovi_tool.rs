//! The two dovi_tool subcommands used by the crop pipeline.
//!
//! Both calls succeed only if the tool exits with status 0 *and* the file it
//! was asked to produce exists afterwards. Either failure collapses into the
//! same `CoreError::ExternalTool` error.

use super::executor::{DoviToolExecutor, ToolOutput};
use crate::error::{CoreError, CoreResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Arguments for `dovi_tool export --data level5=<out_json> -i <input>`.
pub fn export_args(input_rpu: &Path, out_json: &Path) -> Vec<OsString> {
    let mut level5 = OsString::from("level5=");
    level5.push(out_json);
    vec![
        "export".into(),
        "--data".into(),
        level5,
        "-i".into(),
        input_rpu.into(),
    ]
}

/// Arguments for `dovi_tool editor -i <input> -j <edited_json> -o <output>`.
pub fn editor_args(input_rpu: &Path, edited_json: &Path, output_rpu: &Path) -> Vec<OsString> {
    vec![
        "editor".into(),
        "-i".into(),
        input_rpu.into(),
        "-j".into(),
        edited_json.into(),
        "-o".into(),
        output_rpu.into(),
    ]
}

/// Exports the level 5 (active area) metadata of `input_rpu` to `out_json`.
pub fn export_active_area<E: DoviToolExecutor + ?Sized>(
    executor: &E,
    input_rpu: &Path,
    out_json: &Path,
) -> CoreResult<PathBuf> {
    log::info!(
        "Exporting active area data from {} to {}",
        input_rpu.display(),
        out_json.display()
    );
    let output = executor.execute(&export_args(input_rpu, out_json))?;
    expect_output(&output, out_json, "Error exporting active area data")
}

/// Writes `output_rpu` from `input_rpu` with the edits in `edited_json` applied.
pub fn reembed_rpu<E: DoviToolExecutor + ?Sized>(
    executor: &E,
    input_rpu: &Path,
    edited_json: &Path,
    output_rpu: &Path,
) -> CoreResult<PathBuf> {
    log::info!(
        "Writing modified RPU {} using {}",
        output_rpu.display(),
        edited_json.display()
    );
    let output = executor.execute(&editor_args(input_rpu, edited_json, output_rpu))?;
    expect_output(&output, output_rpu, "Error writing modified RPU")
}

fn expect_output(output: &ToolOutput, produced: &Path, message: &str) -> CoreResult<PathBuf> {
    if !output.success() {
        log::error!("dovi_tool failed with {}", output.describe_status());
        if let Some(last) = output.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            log::error!("dovi_tool stderr: {}", last.trim());
        }
        return Err(CoreError::ExternalTool(message.to_string()));
    }
    if !produced.exists() {
        log::error!(
            "dovi_tool exited successfully but {} does not exist",
            produced.display()
        );
        return Err(CoreError::ExternalTool(message.to_string()));
    }
    Ok(produced.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockDoviTool;
    use tempfile::tempdir;

    #[test]
    fn export_args_follow_template() {
        let args = export_args(Path::new("in.bin"), Path::new("out_exp_ar.json"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["export", "--data", "level5=out_exp_ar.json", "-i", "in.bin"]);
    }

    #[test]
    fn editor_args_follow_template() {
        let args = editor_args(Path::new("in.bin"), Path::new("edit.json"), Path::new("out.bin"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["editor", "-i", "in.bin", "-j", "edit.json", "-o", "out.bin"]);
    }

    #[test]
    fn export_succeeds_when_tool_writes_file() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("out_exp_ar.json");
        let tool = MockDoviTool::new();
        tool.set_export_document(r#"{"presets":[]}"#);

        let path = export_active_area(&tool, Path::new("in.bin"), &json).unwrap();
        assert_eq!(path, json);
        assert!(json.exists());
        assert_eq!(tool.received_calls()[0][0], "export");
    }

    #[test]
    fn export_fails_on_nonzero_exit() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("out_exp_ar.json");
        let tool = MockDoviTool::new();
        tool.fail_subcommand("export", 1);

        let err = export_active_area(&tool, Path::new("in.bin"), &json).unwrap_err();
        assert!(matches!(err, CoreError::ExternalTool(_)));
        assert_eq!(err.to_string(), "Error exporting active area data");
    }

    #[test]
    fn export_fails_when_file_missing_despite_success() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("out_exp_ar.json");
        let tool = MockDoviTool::new();
        tool.skip_output_for("export");

        let err = export_active_area(&tool, Path::new("in.bin"), &json).unwrap_err();
        assert_eq!(err.to_string(), "Error exporting active area data");
    }

    #[test]
    fn reembed_fails_on_nonzero_exit() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.bin");
        let tool = MockDoviTool::new();
        tool.fail_subcommand("editor", 101);

        let err = reembed_rpu(&tool, Path::new("in.bin"), Path::new("e.json"), &out).unwrap_err();
        assert_eq!(err.to_string(), "Error writing modified RPU");
        assert!(!out.exists());
    }
}
