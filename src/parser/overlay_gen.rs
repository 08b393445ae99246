//! Overlay config generation (serialization).
//!
//! Flattens overlays back into `key = value` pairs. Attributes equal to the
//! default they would inherit are left out; counts and descriptor tuples are
//! always written.

use crate::models::defaults::{
    DEFAULT_ALPHA_MOD, DEFAULT_ASPECT_RATIO, DEFAULT_BLOCK_SEPARATION, DEFAULT_FULLSCREEN,
    DEFAULT_IMAGE_RECT, DEFAULT_NORMALIZED, DEFAULT_RANGE_MOD,
};
use crate::models::{DescriptorDefaults, InputOverlay, Overlay, Region};
use crate::parser::flat::FlatConfig;
use crate::parser::keys::{desc_attr_key, desc_key, overlay_key, DescAttr, OverlayAttr, OVERLAY_COUNT_KEY};
use anyhow::{Context, Result};
use std::path::Path;

/// Writes an overlay config file.
///
/// This performs an atomic write using a temp file + rename pattern so the
/// file is never left half-written.
///
/// # Errors
///
/// Returns errors for:
/// - Regions without a button identifier
/// - File I/O failures
pub fn save_overlay_file(collection: &InputOverlay, path: &Path) -> Result<()> {
    let content = generate_cfg(collection)?;
    atomic_write(path, &content)
}

/// Generates config text, one entry per line with a trailing newline.
pub fn generate_cfg(collection: &InputOverlay) -> Result<String> {
    let flat = encode_overlays(collection)?;
    let mut output = flat.to_cfg_string();
    output.push('\n');
    Ok(output)
}

/// Flattens overlays into an ordered key/value mapping.
pub fn encode_overlays(collection: &InputOverlay) -> Result<FlatConfig> {
    let mut flat = FlatConfig::new();
    flat.insert(OVERLAY_COUNT_KEY, collection.len());

    for (i, overlay) in collection.iter().enumerate() {
        encode_overlay(&mut flat, i, overlay).with_context(|| format!("Error encoding overlay {i}"))?;
    }

    Ok(flat)
}

#[allow(clippy::float_cmp)]
fn encode_overlay(flat: &mut FlatConfig, i: usize, overlay: &Overlay) -> Result<()> {
    let key = |attr| overlay_key(i, attr);

    if let Some(name) = &overlay.name {
        flat.insert(key(OverlayAttr::Name), name.as_str());
    }
    if let Some(image) = &overlay.image {
        flat.insert(key(OverlayAttr::Image), image.as_str());
    }
    if overlay.image_rect() != DEFAULT_IMAGE_RECT {
        flat.insert(key(OverlayAttr::Rect), overlay.image_rect().to_string());
    }
    if overlay.fullscreen() != DEFAULT_FULLSCREEN {
        flat.insert(key(OverlayAttr::FullScreen), overlay.fullscreen());
    }
    if overlay.aspect_ratio() != DEFAULT_ASPECT_RATIO {
        flat.insert(key(OverlayAttr::AspectRatio), overlay.aspect_ratio());
    }
    if overlay.block_x_separation() != DEFAULT_BLOCK_SEPARATION {
        flat.insert(key(OverlayAttr::BlockXSeparation), overlay.block_x_separation());
    }
    if overlay.block_y_separation() != DEFAULT_BLOCK_SEPARATION {
        flat.insert(key(OverlayAttr::BlockYSeparation), overlay.block_y_separation());
    }

    let defaults = &overlay.defaults;
    if defaults.normalized() != DEFAULT_NORMALIZED {
        flat.insert(key(OverlayAttr::Normalized), defaults.normalized());
    }
    if defaults.alpha_mod() != DEFAULT_ALPHA_MOD {
        flat.insert(key(OverlayAttr::AlphaMod), defaults.alpha_mod());
    }
    if defaults.range_mod() != DEFAULT_RANGE_MOD {
        flat.insert(key(OverlayAttr::RangeMod), defaults.range_mod());
    }

    flat.insert(key(OverlayAttr::Descs), overlay.regions.len());
    for (j, region) in overlay.regions.iter().enumerate() {
        encode_region(flat, i, j, region, defaults)
            .with_context(|| format!("Error encoding descriptor {j}"))?;
    }

    Ok(())
}

/// Region-level inheritable attributes are compared against the overlay's
/// effective value, not the format-wide one.
#[allow(clippy::float_cmp)]
fn encode_region(
    flat: &mut FlatConfig,
    i: usize,
    j: usize,
    region: &Region,
    defaults: &DescriptorDefaults,
) -> Result<()> {
    let key = |attr| desc_attr_key(i, j, attr);

    flat.insert(desc_key(i, j), region.core_string()?);

    if let Some(image) = &region.image {
        flat.insert(key(DescAttr::Image), image.as_str());
    }
    if region.is_moveable() {
        flat.insert(key(DescAttr::Moveable), true);
    }
    if let Some(target) = &region.next_target {
        flat.insert(key(DescAttr::NextTarget), target.as_str());
    }
    if let Some(saturation) = region.saturation {
        flat.insert(key(DescAttr::SaturatePct), saturation);
    }

    let normalized = region.is_normalized(defaults);
    if normalized != defaults.normalized() {
        flat.insert(key(DescAttr::Normalized), normalized);
    }
    let alpha_mod = region.effective_alpha_mod(defaults);
    if alpha_mod != defaults.alpha_mod() {
        flat.insert(key(DescAttr::AlphaMod), alpha_mod);
    }
    let range_mod = region.effective_range_mod(defaults);
    if range_mod != defaults.range_mod() {
        flat.insert(key(DescAttr::RangeMod), range_mod);
    }

    Ok(())
}

/// Atomically writes content to a file using temp file + rename.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("cfg.tmp");

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
