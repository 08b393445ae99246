//! Overlay config decoding.
//!
//! Rebuilds the overlay → region structure from the flat key/value mapping.
//! Only keys named by [`crate::parser::keys`] are consulted; everything else
//! is ignored here and reported by the validator instead.
//!
//! # File Format
//!
//! ```text
//! overlays = 2
//!
//! overlay0_name = "landscape"
//! overlay0_overlay = "img/landscape.png"
//! overlay0_normalized = true
//! overlay0_descs = 2
//! overlay0_desc0 = "a,0.9,0.6,radial,0.05,0.09"
//! overlay0_desc1 = "overlay_next,0.5,0.1,rect,0.04,0.04"
//! overlay0_desc1_next_target = "portrait"
//!
//! overlay1_name = "portrait"
//! overlay1_descs = 0
//! ```

use crate::constants::APP_BINARY_NAME;
use crate::models::{InputOverlay, Overlay, Rect, Region};
use crate::parser::flat::{FlatConfig, ParseWarning};
use crate::parser::keys::{desc_attr_key, desc_key, overlay_key, DescAttr, OverlayAttr, OVERLAY_COUNT_KEY};
use crate::parser::value::ConfigValue;
use anyhow::{Context, Result};
use std::path::Path;

/// Parses an overlay config file.
///
/// # Errors
///
/// Returns errors for:
/// - File not found or unreadable
/// - Malformed image rectangles
/// - Descriptor tuples with the wrong field count, bad numbers or an
///   unknown hitbox kind
/// - Descriptors declared by `overlay{i}_descs` but missing from the file
pub fn parse_overlay_file(path: &Path) -> Result<InputOverlay> {
    if !path.exists() {
        anyhow::bail!(
            "Overlay file not found: {}\n\n\
             Please check the file path and try again.\n\
             Run `{} --help` for usage.",
            path.display(),
            APP_BINARY_NAME
        );
    }

    if !path.is_file() {
        anyhow::bail!(
            "Path is not a file: {}\n\n\
             Please provide a path to an overlay (.cfg) file.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read overlay file: {}", path.display()))?;

    parse_overlay_str(&content)
        .with_context(|| format!("Failed to parse overlay file: {}", path.display()))
}

/// Parses overlay config text.
pub fn parse_overlay_str(content: &str) -> Result<InputOverlay> {
    let flat = FlatConfig::parse(content);
    decode_overlays(&flat)
}

/// Decodes a flat mapping into overlays.
pub fn decode_overlays(flat: &FlatConfig) -> Result<InputOverlay> {
    decode_overlays_with_warnings(flat).map(|(overlays, _)| overlays)
}

/// Decodes a flat mapping, also returning type-mismatch warnings.
///
/// A value of the wrong kind for its attribute (e.g. `overlay0_name = 3`)
/// is treated as absent and reported here.
pub fn decode_overlays_with_warnings(
    flat: &FlatConfig,
) -> Result<(InputOverlay, Vec<ParseWarning>)> {
    let mut decoder = Decoder {
        flat,
        warnings: Vec::new(),
    };

    let count = decoder.count(OVERLAY_COUNT_KEY);
    let mut collection = InputOverlay::new();

    for i in 0..count {
        let overlay = decoder
            .decode_overlay(i)
            .with_context(|| format!("Error decoding overlay {i}"))?;
        collection.push(overlay);
    }

    tracing::debug!(overlays = collection.len(), "decoded overlay config");
    Ok((collection, decoder.warnings))
}

struct Decoder<'a> {
    flat: &'a FlatConfig,
    warnings: Vec<ParseWarning>,
}

impl Decoder<'_> {
    fn decode_overlay(&mut self, i: usize) -> Result<Overlay> {
        let mut overlay = Overlay::new();

        overlay.name = self.text(&overlay_key(i, OverlayAttr::Name));
        overlay.fullscreen = self.boolean(&overlay_key(i, OverlayAttr::FullScreen));
        overlay.image = self.text(&overlay_key(i, OverlayAttr::Image));

        let rect_key = overlay_key(i, OverlayAttr::Rect);
        if let Some(rect) = self.text(&rect_key) {
            overlay.image_rect =
                Some(Rect::parse(&rect).with_context(|| format!("Invalid value for {rect_key}"))?);
        }

        overlay.aspect_ratio = self.number(&overlay_key(i, OverlayAttr::AspectRatio));
        overlay.block_x_separation = self.boolean(&overlay_key(i, OverlayAttr::BlockXSeparation));
        overlay.block_y_separation = self.boolean(&overlay_key(i, OverlayAttr::BlockYSeparation));

        overlay.defaults.normalized = self.boolean(&overlay_key(i, OverlayAttr::Normalized));
        overlay.defaults.alpha_mod = self.number(&overlay_key(i, OverlayAttr::AlphaMod));
        overlay.defaults.range_mod = self.number(&overlay_key(i, OverlayAttr::RangeMod));

        let desc_count = self.count(&overlay_key(i, OverlayAttr::Descs));
        for j in 0..desc_count {
            let region = self
                .decode_region(i, j)
                .with_context(|| format!("Error decoding descriptor {j}"))?;
            overlay.regions.push(region);
        }

        Ok(overlay)
    }

    fn decode_region(&mut self, i: usize, j: usize) -> Result<Region> {
        let core_key = desc_key(i, j);
        let core = match self.flat.get(&core_key) {
            Some(ConfigValue::Text(core)) => core,
            Some(other) => anyhow::bail!(
                "{core_key} must be a quoted descriptor string, got {} {other}",
                other.kind_name()
            ),
            None => anyhow::bail!(
                "Missing descriptor {core_key} (overlay{i}_descs declares more descriptors than are present)"
            ),
        };

        let mut region =
            Region::parse_core(i, core).with_context(|| format!("Invalid value for {core_key}"))?;

        region.image = self.text(&desc_attr_key(i, j, DescAttr::Image));
        region.moveable = self.boolean(&desc_attr_key(i, j, DescAttr::Moveable));
        region.next_target = self.text(&desc_attr_key(i, j, DescAttr::NextTarget));

        let saturate_key = desc_attr_key(i, j, DescAttr::SaturatePct);
        region.saturation = if self.flat.declares(&saturate_key) {
            self.number(&saturate_key)
        } else {
            self.number(&desc_attr_key(i, j, DescAttr::Pct))
        };

        region.normalized = self.boolean(&desc_attr_key(i, j, DescAttr::Normalized));
        region.alpha_mod = self.number(&desc_attr_key(i, j, DescAttr::AlphaMod));
        region.range_mod = self.number(&desc_attr_key(i, j, DescAttr::RangeMod));

        Ok(region)
    }

    fn text(&mut self, key: &str) -> Option<String> {
        let value = self.flat.get(key)?;
        match value.as_text() {
            Some(text) => Some(text.to_string()),
            None => self.mismatch(key, "string", value),
        }
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        let value = self.flat.get(key)?;
        match value.as_bool() {
            Some(flag) => Some(flag),
            None => self.mismatch(key, "boolean", value),
        }
    }

    fn number(&mut self, key: &str) -> Option<f64> {
        let value = self.flat.get(key)?;
        match value.as_f64() {
            Some(number) => Some(number),
            None => self.mismatch(key, "number", value),
        }
    }

    /// Missing or unusable counts read as zero.
    fn count(&mut self, key: &str) -> usize {
        let Some(value) = self.flat.get(key) else {
            return 0;
        };
        match value.as_count() {
            Some(count) => count,
            None => self.mismatch(key, "non-negative integer", value).unwrap_or(0),
        }
    }

    fn mismatch<T>(&mut self, key: &str, expected: &str, value: &ConfigValue) -> Option<T> {
        let message = format!("expected {expected}, got {} {value}", value.kind_name());
        tracing::warn!("Ignoring {key}: {message}");
        self.warnings.push(ParseWarning::for_key(key, message));
        None
    }
}
