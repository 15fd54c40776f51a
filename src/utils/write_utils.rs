//! Output writing utilities
//!
//! Helpers for writing cropped images and JSON data files to disk. Every
//! failure here surfaces as `WriteFailure` naming the offending path.

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use log::debug;
use serde::Serialize;

use crate::errors::{ExamError, ExamResult};

/// Create the parent directory of `path` if it does not exist yet
pub fn ensure_parent_dir(path: &Path) -> ExamResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    fs::create_dir_all(parent).map_err(|e| ExamError::WriteFailure {
        path: parent.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Save `image` as an RGB PNG file at `path`, creating directories as needed
///
/// Rendered pages are opaque, so the alpha channel is dropped.
pub fn write_png(image: &DynamicImage, path: &Path) -> ExamResult<()> {
    ensure_parent_dir(path)?;

    DynamicImage::ImageRgb8(image.to_rgb8())
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ExamError::WriteFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!("Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Serialize `value` as pretty-printed JSON (2-space indent) to `path`
///
/// # Returns
/// The number of bytes written
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> ExamResult<usize> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ExamError::GenericError(format!("Failed to serialize JSON: {}", e)))?;

    ensure_parent_dir(path)?;
    fs::write(path, &json).map_err(|e| ExamError::WriteFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(json.len())
}
