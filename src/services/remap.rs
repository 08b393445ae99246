//! Coordinate remapping between normalized and pixel units.
//!
//! The canvas for each overlay is picked by naming convention: overlays whose
//! name contains the landscape marker use the configured landscape canvas,
//! all others use the same canvas rotated.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::RemapConfig;
use crate::models::{InputOverlay, Overlay};

/// Target coordinate mode of a remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    /// Pixel coordinates
    Absolute,
    /// 0..1 coordinates
    Normalized,
}

/// Pixel dimensions of a target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

/// What happened to one overlay during a remap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemapEntry {
    /// Overlay ordinal
    pub index: usize,
    /// Overlay name
    pub name: Option<String>,
    /// Canvas used
    pub canvas: Canvas,
    /// True if the overlay was already in the target mode and left alone
    pub skipped: bool,
}

/// Picks the canvas for an overlay.
#[must_use]
pub fn canvas_for(overlay: &Overlay, remap: &RemapConfig) -> Canvas {
    let landscape = overlay
        .name
        .as_deref()
        .is_some_and(|name| name.contains(&remap.landscape_marker));

    if landscape {
        Canvas {
            width: remap.width,
            height: remap.height,
        }
    } else {
        Canvas {
            width: remap.height,
            height: remap.width,
        }
    }
}

/// Converts every overlay to `target` using its conventional canvas.
///
/// Overlays whose coordinate-mode flag already equals the target are left
/// untouched, since the transform is not idempotent.
pub fn remap_overlays(
    overlays: &mut InputOverlay,
    target: CoordinateMode,
    remap: &RemapConfig,
) -> Result<Vec<RemapEntry>> {
    let mut entries = Vec::with_capacity(overlays.len());

    for (index, overlay) in overlays.iter_mut().enumerate() {
        let canvas = canvas_for(overlay, remap);
        let already = match target {
            CoordinateMode::Absolute => !overlay.is_normalized(),
            CoordinateMode::Normalized => overlay.is_normalized(),
        };

        if already {
            tracing::info!(
                index,
                name = overlay.name.as_deref().unwrap_or("<unnamed>"),
                "overlay already in target mode, skipping"
            );
        } else {
            match target {
                CoordinateMode::Absolute => overlay.to_absolute(canvas.width, canvas.height),
                CoordinateMode::Normalized => overlay.to_normalized(canvas.width, canvas.height),
            }
            .with_context(|| format!("Failed to remap overlay {index}"))?;
        }

        entries.push(RemapEntry {
            index,
            name: overlay.name.clone(),
            canvas,
            skipped: already,
        });
    }

    Ok(entries)
}
