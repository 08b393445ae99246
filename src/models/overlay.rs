//! A single selectable overlay (layout) and its coordinate transforms.

use crate::models::defaults::{
    DescriptorDefaults, DEFAULT_ASPECT_RATIO, DEFAULT_BLOCK_SEPARATION, DEFAULT_FULLSCREEN,
    DEFAULT_IMAGE_RECT,
};
use crate::models::resolved::{ResolvedOverlay, ResolvedRegion};
use crate::models::{Rect, Region};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One full-screen arrangement of regions over a background image.
///
/// Every attribute is optional; `None` means the format-wide default applies.
/// `defaults` carries the values inherited by the overlay's regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Display name, used as the target of `next_target` links
    pub name: Option<String>,
    /// Background image path
    pub image: Option<String>,
    /// Background image rectangle
    pub image_rect: Option<Rect>,
    /// Width / height of the canvas the overlay was designed for
    pub aspect_ratio: Option<f64>,
    /// `block_x_separation`
    pub block_x_separation: Option<bool>,
    /// `block_y_separation`
    pub block_y_separation: Option<bool>,
    /// `full_screen`
    pub fullscreen: Option<bool>,
    /// Defaults inherited by regions
    pub defaults: DescriptorDefaults,
    /// Regions, addressed by ordinal
    pub regions: Vec<Region>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty overlay with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Effective aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio.unwrap_or(DEFAULT_ASPECT_RATIO)
    }

    /// Effective `block_x_separation`.
    #[must_use]
    pub fn block_x_separation(&self) -> bool {
        self.block_x_separation.unwrap_or(DEFAULT_BLOCK_SEPARATION)
    }

    /// Effective `block_y_separation`.
    #[must_use]
    pub fn block_y_separation(&self) -> bool {
        self.block_y_separation.unwrap_or(DEFAULT_BLOCK_SEPARATION)
    }

    /// Effective fullscreen flag.
    #[must_use]
    pub fn fullscreen(&self) -> bool {
        self.fullscreen.unwrap_or(DEFAULT_FULLSCREEN)
    }

    /// Effective background image rectangle.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.image_rect.unwrap_or(DEFAULT_IMAGE_RECT)
    }

    /// Whether the overlay's regions default to normalized coordinates.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.defaults.normalized()
    }

    /// Returns true if the overlay's name matches.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Converts pixel coordinates into normalized ones.
    ///
    /// Divides every region's `(x, y, rx, ry)` by `(width, height)`, sets the
    /// aspect ratio to `width / height` and marks the overlay normalized.
    /// This is not idempotent: the caller must know the overlay is absolute.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is not a positive finite number.
    pub fn to_normalized(&mut self, width: f64, height: f64) -> Result<()> {
        check_dimensions(width, height)?;

        self.aspect_ratio = Some(width / height);
        self.defaults.normalized = Some(true);
        for region in &mut self.regions {
            region.x /= width;
            region.y /= height;
            region.rx /= width;
            region.ry /= height;
            region.normalized = None;
        }

        tracing::debug!(
            overlay = self.name.as_deref().unwrap_or("<unnamed>"),
            width,
            height,
            "converted overlay to normalized coordinates"
        );
        Ok(())
    }

    /// Converts normalized coordinates into pixels.
    ///
    /// Multiplies every region's `(x, y, rx, ry)` by `(width, height)` and
    /// rounds to the nearest integer, sets the aspect ratio to
    /// `width / height` and clears the normalized flag. Not idempotent.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is not a positive finite number.
    pub fn to_absolute(&mut self, width: f64, height: f64) -> Result<()> {
        check_dimensions(width, height)?;

        self.aspect_ratio = Some(width / height);
        self.defaults.normalized = None;
        for region in &mut self.regions {
            region.x = (region.x * width).round();
            region.y = (region.y * height).round();
            region.rx = (region.rx * width).round();
            region.ry = (region.ry * height).round();
            region.normalized = None;
        }

        tracing::debug!(
            overlay = self.name.as_deref().unwrap_or("<unnamed>"),
            width,
            height,
            "converted overlay to absolute coordinates"
        );
        Ok(())
    }

    /// Produces the renderer view with every default applied.
    #[must_use]
    pub fn resolve(&self) -> ResolvedOverlay {
        ResolvedOverlay {
            name: self.name.clone(),
            image: self.image.clone(),
            image_rect: self.image_rect(),
            aspect_ratio: self.aspect_ratio(),
            fullscreen: self.fullscreen(),
            block_x_separation: self.block_x_separation(),
            block_y_separation: self.block_y_separation(),
            normalized: self.is_normalized(),
            regions: self
                .regions
                .iter()
                .enumerate()
                .map(|(idx, region)| ResolvedRegion::new(idx, region, &self.defaults))
                .collect(),
        }
    }
}

fn check_dimensions(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        anyhow::bail!("Canvas dimensions must be positive, got {width}x{height}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HitboxKind;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn normalized_overlay() -> Overlay {
        let mut overlay = Overlay::named("landscape");
        overlay.defaults.normalized = Some(true);
        overlay
            .regions
            .push(Region::new(0, "a", 0.5, 0.5, HitboxKind::Radial, 0.1, 0.2));
        overlay
    }

    #[test]
    fn test_effective_defaults() {
        let overlay = Overlay::new();
        assert!(approx(overlay.aspect_ratio(), 1.0));
        assert!(!overlay.block_x_separation());
        assert!(!overlay.block_y_separation());
        assert!(!overlay.fullscreen());
        assert_eq!(overlay.image_rect(), Rect::UNIT);
        assert!(!overlay.is_normalized());
    }

    #[test]
    fn test_to_absolute() {
        let mut overlay = normalized_overlay();
        overlay.to_absolute(2560.0, 1440.0).unwrap();

        let region = &overlay.regions[0];
        assert!(approx(region.x, 1280.0));
        assert!(approx(region.y, 720.0));
        assert!(approx(region.rx, 256.0));
        assert!(approx(region.ry, 288.0));
        assert!(approx(overlay.aspect_ratio(), 2560.0 / 1440.0));
        assert!(!overlay.is_normalized());
        assert_eq!(overlay.defaults.normalized, None);
    }

    #[test]
    fn test_to_absolute_rounds_to_nearest() {
        let mut overlay = normalized_overlay();
        overlay.regions[0].x = 0.1234;
        overlay.to_absolute(1000.0, 1000.0).unwrap();
        assert!(approx(overlay.regions[0].x, 123.0));
    }

    #[test]
    fn test_to_absolute_rounds_halves_away_from_zero() {
        let mut overlay = normalized_overlay();
        overlay.regions[0].x = -0.25;
        overlay.regions[0].y = 0.25;
        overlay.to_absolute(10.0, 10.0).unwrap();
        assert!(approx(overlay.regions[0].x, -3.0));
        assert!(approx(overlay.regions[0].y, 3.0));
    }

    #[test]
    fn test_to_normalized_inverts_to_absolute() {
        let mut overlay = Overlay::named("portrait");
        overlay
            .regions
            .push(Region::new(0, "b", 1280.0, 720.0, HitboxKind::Rect, 256.0, 288.0));

        overlay.to_normalized(2560.0, 1440.0).unwrap();
        let region = &overlay.regions[0];
        assert!(approx(region.x, 0.5));
        assert!(approx(region.y, 0.5));
        assert!(approx(region.rx, 0.1));
        assert!(approx(region.ry, 0.2));
        assert!(overlay.is_normalized());
    }

    #[test]
    fn test_transform_is_not_idempotent() {
        let mut overlay = normalized_overlay();
        overlay.to_absolute(10.0, 10.0).unwrap();
        overlay.to_absolute(10.0, 10.0).unwrap();
        assert!(approx(overlay.regions[0].x, 50.0));
    }

    #[test]
    fn test_transform_rejects_bad_dimensions() {
        let mut overlay = normalized_overlay();
        assert!(overlay.to_absolute(0.0, 10.0).is_err());
        assert!(overlay.to_normalized(10.0, -1.0).is_err());
        assert!(overlay.to_normalized(f64::NAN, 1.0).is_err());
        // Untouched on error
        assert!(approx(overlay.regions[0].x, 0.5));
    }

    #[test]
    fn test_resolve_applies_inheritance() {
        let mut overlay = normalized_overlay();
        overlay.defaults.alpha_mod = Some(0.5);
        overlay
            .regions
            .push(Region::new(0, "b", 0.2, 0.2, HitboxKind::Rect, 0.1, 0.1));
        overlay.regions[1].alpha_mod = Some(0.9);

        let resolved = overlay.resolve();
        assert!(resolved.normalized);
        assert!(approx(resolved.regions[0].alpha_mod, 0.5));
        assert!(approx(resolved.regions[1].alpha_mod, 0.9));
        assert!(resolved.regions[0].normalized);
        assert_eq!(resolved.regions[1].index, 1);
    }
}
