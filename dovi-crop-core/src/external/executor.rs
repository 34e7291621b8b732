//! Process execution for dovi_tool.
//!
//! The [`DoviToolExecutor`] trait is the seam between the pipeline and the
//! operating system. [`CommandExecutor`] runs the real binary with
//! `std::process::Command`; tests substitute the mock from
//! [`crate::external::mocks`].

use crate::error::{CoreResult, command_start_error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit information and captured output of one dovi_tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with exit code 0.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human readable exit status for log messages.
    pub fn describe_status(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        }
    }
}

/// Runs dovi_tool with a list of arguments and waits for it to finish.
pub trait DoviToolExecutor {
    /// Path or name of the program being executed.
    fn program(&self) -> &Path;

    /// Runs the tool to completion. Only a failure to start the process is an
    /// error; a non-zero exit is reported through [`ToolOutput::code`].
    fn execute(&self, args: &[OsString]) -> CoreResult<ToolOutput>;
}

/// Executes the real dovi_tool binary.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: PathBuf,
}

impl CommandExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DoviToolExecutor for CommandExecutor {
    fn program(&self) -> &Path {
        &self.program
    }

    fn execute(&self, args: &[OsString]) -> CoreResult<ToolOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        log::debug!(
            "Executing command: {} {}",
            self.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        // No timeout: a hung dovi_tool blocks the job
        let output = cmd
            .output()
            .map_err(|e| command_start_error(&self.program, e))?;

        let result = ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
            log::debug!("dovi_tool stdout: {}", line);
        }
        for line in result.stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::debug!("dovi_tool stderr: {}", line);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn missing_program_is_a_start_error() {
        let executor = CommandExecutor::new("/definitely/not/a/real/dovi_tool");
        let err = executor.execute(&["--version".into()]).unwrap_err();
        assert!(matches!(err, CoreError::CommandStart(..)));
        assert!(err.to_string().contains("/definitely/not/a/real/dovi_tool"));
    }

    #[test]
    fn describe_status() {
        assert!(ToolOutput::ok().success());
        assert!(!ToolOutput::with_code(3).success());
        assert_eq!(ToolOutput::with_code(3).describe_status(), "exit code 3");
        assert_eq!(ToolOutput::default().describe_status(), "termination by signal");
    }
}
