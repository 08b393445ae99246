//! Read-only views with all defaults applied, as consumed by a renderer.
//!
//! Coordinates are reported as stored, together with the effective
//! coordinate mode. Mapping to screen pixels is left to the consumer.

use crate::models::defaults::DescriptorDefaults;
use crate::models::{HitboxKind, Rect, Region};
use serde::Serialize;

/// A fully resolved overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOverlay {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Background image path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Background image rectangle
    pub image_rect: Rect,
    /// Aspect ratio
    pub aspect_ratio: f64,
    /// Fullscreen flag
    pub fullscreen: bool,
    /// `block_x_separation`
    pub block_x_separation: bool,
    /// `block_y_separation`
    pub block_y_separation: bool,
    /// Overlay-level coordinate mode
    pub normalized: bool,
    /// Regions in ordinal order
    pub regions: Vec<ResolvedRegion>,
}

/// A fully resolved region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRegion {
    /// Ordinal within the overlay
    pub index: usize,
    /// Raw button identifier
    pub button: String,
    /// Button identifier split on `|`
    pub buttons: Vec<String>,
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Hit test shape
    pub hitbox: HitboxKind,
    /// Half-extent on x
    pub rx: f64,
    /// Half-extent on y
    pub ry: f64,
    /// Effective coordinate mode
    pub normalized: bool,
    /// Effective alpha modifier
    pub alpha_mod: f64,
    /// Effective range modifier
    pub range_mod: f64,
    /// Effective moveable flag
    pub moveable: bool,
    /// Region image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Overlay to switch to on activation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_target: Option<String>,
    /// Saturation percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
}

impl ResolvedRegion {
    /// Resolves a region against its overlay's defaults.
    #[must_use]
    pub fn new(index: usize, region: &Region, defaults: &DescriptorDefaults) -> Self {
        Self {
            index,
            button: region.button.clone(),
            buttons: region.buttons().map(str::to_string).collect(),
            x: region.x,
            y: region.y,
            hitbox: region.hitbox,
            rx: region.rx,
            ry: region.ry,
            normalized: region.is_normalized(defaults),
            alpha_mod: region.effective_alpha_mod(defaults),
            range_mod: region.effective_range_mod(defaults),
            moveable: region.is_moveable(),
            image: region.image.clone(),
            next_target: region.next_target.clone(),
            saturation: region.saturation,
        }
    }

    /// Hit test for a point given in the region's own coordinate space.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.hitbox
            .contains_offset(x - self.x, y - self.y, self.rx, self.ry)
    }
}
