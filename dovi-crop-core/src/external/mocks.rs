// dovi-crop-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::executor::{DoviToolExecutor, ToolOutput};
use crate::error::CoreResult;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Export document used when a test does not provide its own.
pub const SAMPLE_EXPORT: &str = r#"{
  "presets": [
    { "id": 0, "left": 20, "right": 20, "top": 280, "bottom": 280 },
    { "id": 1, "left": 240, "right": 240, "top": 140, "bottom": 140 }
  ],
  "edits": { "all": 0 }
}"#;

/// Mock dovi_tool that emulates the `export` and `editor` subcommands on disk.
///
/// `export` writes the configured document to the `level5=` path, `editor`
/// writes a small dummy RPU to the `-o` path and remembers the JSON it was
/// given, so tests can inspect it even after cleanup removed the file.
#[derive(Clone)]
pub struct MockDoviTool {
    program: PathBuf,
    export_document: Rc<RefCell<String>>,
    version_output: Rc<RefCell<String>>,
    failures: Rc<RefCell<HashMap<String, i32>>>,
    skip_output: Rc<RefCell<HashSet<String>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    edited_documents: Rc<RefCell<Vec<String>>>,
}

impl Default for MockDoviTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDoviTool {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("dovi_tool"),
            export_document: Rc::new(RefCell::new(SAMPLE_EXPORT.to_string())),
            version_output: Rc::new(RefCell::new("dovi_tool 2.1.2".to_string())),
            failures: Rc::default(),
            skip_output: Rc::default(),
            received_calls: Rc::default(),
            edited_documents: Rc::default(),
        }
    }

    /// Sets the JSON text written by `export`.
    pub fn set_export_document(&self, json: &str) {
        *self.export_document.borrow_mut() = json.to_string();
    }

    pub fn set_version_output(&self, stdout: &str) {
        *self.version_output.borrow_mut() = stdout.to_string();
    }

    /// Makes `subcommand` exit with `exit_code` without producing output.
    pub fn fail_subcommand(&self, subcommand: &str, exit_code: i32) {
        self.failures
            .borrow_mut()
            .insert(subcommand.to_string(), exit_code);
    }

    /// Makes `subcommand` exit with 0 but skip writing its output file.
    pub fn skip_output_for(&self, subcommand: &str) {
        self.skip_output.borrow_mut().insert(subcommand.to_string());
    }

    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Contents of every JSON file passed to `editor -j`, in call order.
    pub fn edited_documents(&self) -> Vec<String> {
        self.edited_documents.borrow().clone()
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }
}

impl DoviToolExecutor for MockDoviTool {
    fn program(&self) -> &Path {
        &self.program
    }

    fn execute(&self, args: &[OsString]) -> CoreResult<ToolOutput> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let subcommand = args.first().cloned().unwrap_or_default();
        if let Some(code) = self.failures.borrow().get(&subcommand) {
            log::info!("MockDoviTool: simulating exit code {} for '{}'", code, subcommand);
            return Ok(ToolOutput {
                code: Some(*code),
                stderr: format!("mock failure in {subcommand}"),
                ..Default::default()
            });
        }
        let skip = self.skip_output.borrow().contains(&subcommand);

        match subcommand.as_str() {
            "--version" => Ok(ToolOutput {
                code: Some(0),
                stdout: self.version_output.borrow().clone(),
                ..Default::default()
            }),
            "export" => {
                let target = args
                    .iter()
                    .find_map(|a| a.strip_prefix("level5="))
                    .map(PathBuf::from);
                if let (Some(target), false) = (target, skip) {
                    std::fs::write(&target, self.export_document.borrow().as_bytes())?;
                    log::info!("MockDoviTool: wrote export to {}", target.display());
                }
                Ok(ToolOutput::ok())
            }
            "editor" => {
                if let Some(json) = Self::value_after(&args, "-j") {
                    let text = std::fs::read_to_string(json).unwrap_or_default();
                    self.edited_documents.borrow_mut().push(text);
                }
                if let (Some(out), false) = (Self::value_after(&args, "-o"), skip) {
                    std::fs::write(out, b"MOCK_RPU")?;
                    log::info!("MockDoviTool: wrote RPU to {}", out);
                }
                Ok(ToolOutput::ok())
            }
            other => {
                log::error!("MockDoviTool: unexpected subcommand {:?}", other);
                Ok(ToolOutput {
                    code: Some(2),
                    stderr: format!("unrecognized subcommand '{other}'"),
                    ..Default::default()
                })
            }
        }
    }
}
