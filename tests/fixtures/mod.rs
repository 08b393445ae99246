//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use lazyoverlay::models::{HitboxKind, InputOverlay, Overlay, Region};
use lazyoverlay::parser::generate_cfg;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small retropad: a normalized landscape layout, a normalized portrait
/// layout and a hidden portrait layout, linked through `overlay_next`.
pub const RETROPAD_CFG: &str = r#"overlays = 3

overlay0_name = "landscape"
overlay0_overlay = "img/landscape.png"
overlay0_full_screen = true
overlay0_normalized = true
overlay0_descs = 4
overlay0_desc0 = "a,0.9,0.6,radial,0.04,0.07"
overlay0_desc1 = "up,0.1,0.5,rect,0.03,0.05"
overlay0_desc2 = "l2,0.1,0.1,rect,0.05,0.04"
overlay0_desc3 = "overlay_next,0.5,0.05,rect,0.03,0.03"
overlay0_desc3_next_target = "portrait"

overlay1_name = "portrait"
overlay1_overlay = "img/portrait.png"
overlay1_normalized = true
overlay1_alpha_mod = 0.7
overlay1_descs = 7
overlay1_desc0 = "up,0.2,0.8,radial,0.06,0.03"
overlay1_desc1 = "up,0.2,0.8,rect,0.06,0.03"
overlay1_desc2 = "b,0.8,0.85,radial,0.07,0.04"
overlay1_desc3 = "l2,0.1,0.6,rect,0.08,0.02"
overlay1_desc4 = "r3,0.9,0.6,rect,0.08,0.02"
overlay1_desc5 = "select,0.4,0.95,rect,0.05,0.02"
overlay1_desc6 = "overlay_next,0.5,0.98,rect,0.05,0.02"
overlay1_desc6_next_target = "landscape"
overlay1_desc6_alpha_mod = 1.0

overlay2_name = "portrait-hidden"
overlay2_descs = 1
overlay2_desc0 = "l2,0.1,0.6,rect,0.08,0.02"
"#;

/// A config with an unresolved next target.
pub const BROKEN_TARGET_CFG: &str = r#"overlays = 1
overlay0_name = "main"
overlay0_descs = 1
overlay0_desc0 = "overlay_next,100,100,rect,20,20"
overlay0_desc0_next_target = "nowhere"
"#;

/// Builds a collection in absolute coordinates.
pub fn test_overlays_absolute() -> InputOverlay {
    let mut landscape = Overlay::named("landscape");
    landscape
        .regions
        .push(Region::new(0, "a", 2304.0, 864.0, HitboxKind::Radial, 102.0, 101.0));
    let mut next = Region::new(0, "overlay_next", 1280.0, 72.0, HitboxKind::Rect, 77.0, 43.0);
    next.next_target = Some("portrait".to_string());
    landscape.regions.push(next);

    let mut portrait = Overlay::named("portrait");
    portrait
        .regions
        .push(Region::new(1, "b", 1152.0, 2176.0, HitboxKind::Radial, 100.0, 102.0));

    let mut collection = InputOverlay::new();
    collection.push(landscape);
    collection.push(portrait);
    collection
}

/// Writes an overlay collection to a file.
pub fn write_overlay_file(overlays: &InputOverlay, path: &Path) -> std::io::Result<()> {
    let content = generate_cfg(overlays).map_err(std::io::Error::other)?;
    fs::write(path, content)
}

/// Creates a temp directory with `pad.cfg` holding `content`.
pub fn create_temp_cfg_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cfg_path = temp_dir.path().join("pad.cfg");
    fs::write(&cfg_path, content).expect("Failed to write overlay file");
    (cfg_path, temp_dir)
}

/// Creates a temp directory with `pad.cfg` holding an encoded collection.
pub fn create_temp_overlay_file(overlays: &InputOverlay) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cfg_path = temp_dir.path().join("pad.cfg");
    write_overlay_file(overlays, &cfg_path).expect("Failed to write overlay file");
    (cfg_path, temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_retropad_decodes() {
        let overlays = lazyoverlay::parser::parse_overlay_str(RETROPAD_CFG).unwrap();
        assert_eq!(overlays.len(), 3);
        assert_eq!(overlays.get(1).unwrap().regions.len(), 7);
    }

    #[test]
    fn test_fixture_absolute_overlays() {
        let overlays = test_overlays_absolute();
        assert_eq!(overlays.len(), 2);
        assert!(!overlays.get(0).unwrap().is_normalized());
    }
}
