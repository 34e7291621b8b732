//! Argument validation for crop jobs.
//!
//! These checks run before any external tool is touched. The CLI uses them as
//! clap value parsers so bad arguments are rejected with the same messages a
//! library caller would see.

use crate::config::{MAX_MODE, RPU_EXTENSION};
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Returns true if the path has a `.bin` extension (case-insensitive).
#[must_use]
pub fn has_rpu_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RPU_EXTENSION))
}

fn check_rpu_suffix(path: &Path) -> CoreResult<()> {
    if has_rpu_extension(path) {
        return Ok(());
    }
    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    Err(CoreError::FileError(format!(
        "'{suffix}' is not a valid suffix. (Valid input would be 'FILENAME.bin')"
    )))
}

/// Validates an input RPU path: it must exist, be a regular file and end in `.bin`.
pub fn validate_input_file(path: impl AsRef<Path>) -> CoreResult<PathBuf> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CoreError::FileError(format!(
            "{} is not a valid input file",
            path.display()
        )));
    }
    check_rpu_suffix(path)?;
    Ok(path.to_path_buf())
}

/// Validates an output RPU path. Only the suffix is checked; the file may not exist yet.
pub fn validate_output_file(path: impl AsRef<Path>) -> CoreResult<PathBuf> {
    let path = path.as_ref();
    check_rpu_suffix(path)?;
    Ok(path.to_path_buf())
}

/// Parses a crop value made only of ASCII digits.
///
/// Signs, whitespace and the empty string are rejected, as are values that
/// do not fit in a `u32`.
pub fn validate_non_negative_int(raw: &str) -> CoreResult<u32> {
    let invalid = || {
        CoreError::ValueError(format!(
            "'{raw}' is not a valid number. (Valid input would be an integer)"
        ))
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

/// Parses a dovi_tool editor mode, which must be one of 0-5.
pub fn validate_mode(raw: &str) -> CoreResult<u8> {
    let mode = validate_non_negative_int(raw)?;
    if mode > u32::from(MAX_MODE) {
        return Err(CoreError::ValueError(format!(
            "'{raw}' is not a valid mode. (Valid modes are 0 to {MAX_MODE})"
        )));
    }
    // Range checked above
    Ok(mode as u8)
}

/// Validates the dovi_tool path.
///
/// A bare program name (no directory component) is accepted as-is and left
/// to the `PATH` lookup when the process is spawned. A directory resolves to
/// the platform `dovi_tool` executable inside it.
pub fn validate_tool_path(path: impl AsRef<Path>) -> CoreResult<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(CoreError::FileError("dovi_tool path is empty".to_string()));
    }
    if path.is_dir() {
        let candidate = path.join(executable_name("dovi_tool"));
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(CoreError::FileError(format!(
            "{} is not a valid dovi_tool executable",
            candidate.display()
        )));
    }
    let is_bare_name = path.components().count() == 1 && path.parent() == Some(Path::new(""));
    if !is_bare_name && !path.is_file() {
        return Err(CoreError::FileError(format!(
            "{} is not a valid dovi_tool executable",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// Appends the platform executable suffix (`.exe` on Windows) to a program name.
#[must_use]
pub fn executable_name(stem: &str) -> String {
    format!("{stem}{}", std::env::consts::EXE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn input_file_must_exist_and_be_bin() {
        let dir = tempdir().unwrap();
        let rpu = dir.path().join("RPU.bin");
        let upper = dir.path().join("RPU2.BIN");
        let json = dir.path().join("rpu.json");
        File::create(&rpu).unwrap();
        File::create(&upper).unwrap();
        File::create(&json).unwrap();

        assert_eq!(validate_input_file(&rpu).unwrap(), rpu);
        assert!(validate_input_file(&upper).is_ok());

        let err = validate_input_file(&json).unwrap_err();
        assert!(matches!(err, CoreError::FileError(_)));
        assert!(err.to_string().contains("'.json' is not a valid suffix"));

        let missing = dir.path().join("missing.bin");
        let err = validate_input_file(&missing).unwrap_err();
        assert!(err.to_string().contains("is not a valid input file"));

        // Directories are not regular files
        let sub = dir.path().join("folder.bin");
        std::fs::create_dir(&sub).unwrap();
        assert!(validate_input_file(&sub).is_err());
    }

    #[test]
    fn output_file_only_checks_suffix() {
        assert!(validate_output_file("does/not/exist/out.bin").is_ok());
        assert!(validate_output_file("out.Bin").is_ok());
        let err = validate_output_file("out.hevc").unwrap_err();
        assert!(err.to_string().contains("'.hevc'"));
        assert!(validate_output_file("out").is_err());
    }

    #[test]
    fn non_negative_int_accepts_digits_only() {
        assert_eq!(validate_non_negative_int("0").unwrap(), 0);
        assert_eq!(validate_non_negative_int("0042").unwrap(), 42);
        assert_eq!(validate_non_negative_int("280").unwrap(), 280);

        for raw in ["", "-1", "+1", " 1", "1 ", "1.5", "abc", "99999999999"] {
            let err = validate_non_negative_int(raw).unwrap_err();
            assert!(matches!(err, CoreError::ValueError(_)), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn mode_is_closed_set() {
        for mode in 0..=5u8 {
            assert_eq!(validate_mode(&mode.to_string()).unwrap(), mode);
        }
        assert!(validate_mode("6").is_err());
        assert!(validate_mode("-1").is_err());
    }

    #[test]
    fn tool_path_accepts_bare_names() {
        assert!(validate_tool_path("dovi_tool").is_ok());
        assert!(validate_tool_path("").is_err());
        assert!(validate_tool_path("/definitely/not/here/dovi_tool").is_err());

        let dir = tempdir().unwrap();
        let tool = dir.path().join("dovi_tool");
        File::create(&tool).unwrap();
        assert_eq!(validate_tool_path(&tool).unwrap(), tool);
    }

    #[test]
    fn tool_directory_resolves_to_executable() {
        let dir = tempdir().unwrap();
        assert!(validate_tool_path(dir.path()).is_err());

        let tool = dir.path().join(executable_name("dovi_tool"));
        File::create(&tool).unwrap();
        assert_eq!(validate_tool_path(dir.path()).unwrap(), tool);
    }

    #[test]
    fn executable_name_uses_platform_suffix() {
        let name = executable_name("dovi_tool");
        if cfg!(windows) {
            assert_eq!(name, "dovi_tool.exe");
        } else {
            assert_eq!(name, "dovi_tool");
        }
    }
}
