//! Active area (level 5) document model and the crop transform.
//!
//! `dovi_tool export --data level5=...` writes a JSON object holding a
//! `presets` array. Each preset carries `left`/`right`/`top`/`bottom` offsets
//! plus fields we never touch (such as `id`). Unknown fields at both levels
//! are kept through `serde(flatten)` so the editor receives them unchanged.
//!
//! The edited document handed to `dovi_tool editor` nests the export under
//! `active_area` and adds the editor `mode`:
//!
//! ```json
//! { "active_area": { "crop": true, "presets": [ ... ] }, "mode": 2 }
//! ```

use crate::config::CropSpec;
use crate::error::{CoreError, CoreResult, json_processing_error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One set of active area offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveAreaPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActiveAreaPreset {
    /// Offsets after cropping, in left/right/top/bottom order. Missing edges count as 0.
    fn cropped_edges(&self, crop: CropSpec) -> Option<[i64; 4]> {
        let sub = |edge: Option<i64>, amount: u32| {
            edge.unwrap_or(0)
                .checked_sub(i64::from(amount))
                .filter(|v| *v >= 0)
        };
        Some([
            sub(self.left, crop.left)?,
            sub(self.right, crop.right)?,
            sub(self.top, crop.top)?,
            sub(self.bottom, crop.bottom)?,
        ])
    }
}

/// Root of the level 5 export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveAreaExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<ActiveAreaPreset>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActiveAreaExport {
    /// Reads and parses an exported document.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| json_processing_error(path, e))?;
        serde_json::from_str(&text).map_err(|e| json_processing_error(path, e))
    }

    /// Marks the document for cropping and subtracts `crop` from every preset.
    ///
    /// Either every preset is updated or none is: all offsets are computed
    /// before any of them is written back.
    ///
    /// # Errors
    ///
    /// * `CoreError::KeyError` - `presets` is absent or empty
    /// * `CoreError::ValueError` - an offset would become negative
    pub fn apply_crop(&mut self, crop: CropSpec) -> CoreResult<()> {
        self.crop = Some(true);

        let presets = match self.presets.as_mut() {
            Some(presets) if !presets.is_empty() => presets,
            _ => {
                return Err(CoreError::KeyError(
                    "No 'presets' found in the JSON file".to_string(),
                ));
            }
        };

        let adjusted = presets
            .iter()
            .map(|preset| preset.cropped_edges(crop))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                CoreError::ValueError("Negative crop values are not allowed".to_string())
            })?;

        for (preset, [left, right, top, bottom]) in presets.iter_mut().zip(adjusted) {
            preset.left = Some(left);
            preset.right = Some(right);
            preset.top = Some(top);
            preset.bottom = Some(bottom);
        }
        log::debug!("Applied crop {:?} to {} preset(s)", crop, presets.len());
        Ok(())
    }
}

/// Document consumed by `dovi_tool editor -j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    pub active_area: ActiveAreaExport,
    pub mode: u8,
}

impl EditorDocument {
    pub fn new(active_area: ActiveAreaExport, mode: u8) -> Self {
        Self { active_area, mode }
    }

    /// Writes the document as pretty-printed JSON.
    ///
    /// The JSON is written to a temporary file next to `path` and then
    /// renamed into place, so a failed write never leaves a truncated file.
    pub fn write(&self, path: &Path) -> CoreResult<PathBuf> {
        let write_error = |e: &dyn std::fmt::Display| {
            log::error!("Failed to write {}: {}", path.display(), e);
            CoreError::JsonError("Failed to write cropped JSON".to_string())
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_error(&e))?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), self).map_err(|e| write_error(&e))?;
        tmp.as_file_mut()
            .write_all(b"\n")
            .map_err(|e| write_error(&e))?;
        // NamedTempFile is created owner-only; the kept JSON should not be
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| write_error(&e))?;
        }
        tmp.persist(path).map_err(|e| write_error(&e))?;

        if !path.exists() {
            return Err(CoreError::JsonError("Failed to write cropped JSON".to_string()));
        }
        Ok(path.to_path_buf())
    }
}
