//! Overlay file I/O service.
//!
//! This module centralizes all overlay file operations, providing a consistent
//! interface for loading and saving overlay config files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{models::InputOverlay, parser};

/// Service for managing overlay file I/O operations.
///
/// Each call is one complete read or write; no file handle outlives it.
pub struct OverlayService;

impl OverlayService {
    /// Loads overlays from a config file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the overlay file to load
    ///
    /// # Returns
    ///
    /// * `Ok(InputOverlay)` - Successfully parsed overlays
    /// * `Err(...)` - File not found, decode error, or I/O error
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use lazyoverlay::services::OverlayService;
    ///
    /// let overlays = OverlayService::load(Path::new("retropad.cfg"))?;
    /// println!("{} overlays", overlays.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<InputOverlay> {
        parser::parse_overlay_file(path)
            .with_context(|| format!("Failed to load overlays from {}", path.display()))
    }

    /// Saves overlays to a config file.
    ///
    /// This performs an atomic write using a temp file + rename pattern to ensure
    /// the file is never left in a corrupted state.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use lazyoverlay::{models::InputOverlay, services::OverlayService};
    ///
    /// let overlays = InputOverlay::new();
    /// OverlayService::save(&overlays, Path::new("empty.cfg"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(overlays: &InputOverlay, path: &Path) -> Result<()> {
        parser::save_overlay_file(overlays, path)
            .with_context(|| format!("Failed to save overlays to {}", path.display()))
    }

    /// Reads the raw text of an overlay file.
    pub fn read_text(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read overlay file: {}", path.display()))
    }
}

/// Builds a sibling path by inserting `suffix` before the extension.
///
/// # Examples
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use lazyoverlay::services::overlays::derived_path;
/// assert_eq!(
///     derived_path(Path::new("pads/neo-retropad.cfg"), "-abs"),
///     PathBuf::from("pads/neo-retropad-abs.cfg")
/// );
/// ```
#[must_use]
pub fn derived_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_derived_path() {
        assert_eq!(
            derived_path(Path::new("a/pad.cfg"), "-abs"),
            PathBuf::from("a/pad-abs.cfg")
        );
        assert_eq!(derived_path(Path::new("pad"), ".new"), PathBuf::from("pad.new"));
    }

    #[test]
    fn test_load_and_save() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("pad.cfg");
        fs::write(
            &path,
            "overlays = 1\noverlay0_name = \"main\"\noverlay0_descs = 1\noverlay0_desc0 = \"a,1,2,rect,3,4\"\n",
        )?;

        let overlays = OverlayService::load(&path)?;
        assert_eq!(overlays.len(), 1);

        let out = temp_dir.path().join("out.cfg");
        OverlayService::save(&overlays, &out)?;
        assert_eq!(OverlayService::load(&out)?, overlays);
        Ok(())
    }

    #[test]
    fn test_load_reports_path() {
        let err = OverlayService::load(Path::new("/tmp/missing_overlay_test_98765.cfg")).unwrap_err();
        assert!(format!("{err:#}").contains("missing_overlay_test_98765.cfg"));
    }
}
