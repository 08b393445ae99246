//! Interactive regions ("descriptors") of an overlay.

use crate::models::defaults::{
    resolve, DescriptorDefaults, DEFAULT_ALPHA_MOD, DEFAULT_MOVEABLE, DEFAULT_NORMALIZED,
    DEFAULT_RANGE_MOD,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape used for hit testing a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitboxKind {
    /// Axis-aligned box of half-extents `(rx, ry)`
    Rect,
    /// Ellipse of radii `(rx, ry)`
    Radial,
}

impl HitboxKind {
    /// Keyword used in the descriptor tuple.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Radial => "radial",
        }
    }

    /// Tests an offset `(dx, dy)` from the region center against the half-extents.
    #[must_use]
    pub fn contains_offset(self, dx: f64, dy: f64, rx: f64, ry: f64) -> bool {
        match self {
            Self::Rect => dx.abs() <= rx && dy.abs() <= ry,
            Self::Radial => {
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0
            }
        }
    }
}

impl fmt::Display for HitboxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HitboxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "rect" => Ok(Self::Rect),
            "radial" => Ok(Self::Radial),
            other => anyhow::bail!("Unknown hitbox kind '{other}' (expected rect or radial)"),
        }
    }
}

/// One interactive hit-area of an overlay.
///
/// The core tuple `(button, x, y, hitbox, rx, ry)` is mandatory. All other
/// attributes are optional; `None` means "inherit" for the attributes that
/// have an overlay-level default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Ordinal of the owning overlay. Only used to find inherited defaults.
    pub overlay_index: usize,
    /// Button identifier; a combo is two tokens joined by `|`
    pub button: String,
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
    /// Image drawn over the region
    pub image: Option<String>,
    /// Whether the region can be dragged
    pub moveable: Option<bool>,
    /// Name of the overlay to switch to when activated
    pub next_target: Option<String>,
    /// Saturation / opacity percentage
    pub saturation: Option<f64>,
    /// Own coordinate-mode override
    pub normalized: Option<bool>,
    /// Own alpha modifier override
    pub alpha_mod: Option<f64>,
    /// Own range modifier override
    pub range_mod: Option<f64>,
}

impl Region {
    /// Creates a region with only the core tuple set.
    pub fn new(
        overlay_index: usize,
        button: impl Into<String>,
        x: f64,
        y: f64,
        hitbox: HitboxKind,
        rx: f64,
        ry: f64,
    ) -> Self {
        Self {
            overlay_index,
            button: button.into(),
            x,
            y,
            hitbox,
            rx,
            ry,
            image: None,
            moveable: None,
            next_target: None,
            saturation: None,
            normalized: None,
            alpha_mod: None,
            range_mod: None,
        }
    }

    /// Parses the comma-joined core tuple `button,x,y,hitbox,rx,ry`.
    ///
    /// # Errors
    ///
    /// Fails on a field count other than six, a non-numeric coordinate, or
    /// an unknown hitbox kind.
    pub fn parse_core(overlay_index: usize, s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();

        if fields.len() != 6 {
            anyhow::bail!(
                "Descriptor must have 6 comma-separated fields, got {}: \"{s}\"",
                fields.len()
            );
        }

        let number = |idx: usize, what: &str| -> Result<f64> {
            fields[idx]
                .parse::<f64>()
                .with_context(|| format!("Invalid descriptor {what} '{}'", fields[idx]))
        };

        Ok(Self::new(
            overlay_index,
            fields[0],
            number(1, "x")?,
            number(2, "y")?,
            fields[3].parse()?,
            number(4, "rx")?,
            number(5, "ry")?,
        ))
    }

    /// Renders the core tuple.
    ///
    /// # Errors
    ///
    /// Fails if the button identifier is empty.
    pub fn core_string(&self) -> Result<String> {
        if self.button.trim().is_empty() {
            anyhow::bail!("Descriptor is missing its button identifier");
        }

        Ok(format!(
            "{},{},{},{},{},{}",
            self.button, self.x, self.y, self.hitbox, self.rx, self.ry
        ))
    }

    /// Individual buttons of a (possibly combo) identifier.
    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.button.split('|')
    }

    /// Effective coordinate mode given the owning overlay's defaults.
    #[must_use]
    pub fn is_normalized(&self, defaults: &DescriptorDefaults) -> bool {
        resolve(self.normalized, defaults.normalized, DEFAULT_NORMALIZED)
    }

    /// Effective alpha modifier given the owning overlay's defaults.
    #[must_use]
    pub fn effective_alpha_mod(&self, defaults: &DescriptorDefaults) -> f64 {
        resolve(self.alpha_mod, defaults.alpha_mod, DEFAULT_ALPHA_MOD)
    }

    /// Effective range modifier given the owning overlay's defaults.
    #[must_use]
    pub fn effective_range_mod(&self, defaults: &DescriptorDefaults) -> f64 {
        resolve(self.range_mod, defaults.range_mod, DEFAULT_RANGE_MOD)
    }

    /// Effective moveable flag. There is no overlay-level default for it.
    #[must_use]
    pub fn is_moveable(&self) -> bool {
        resolve(self.moveable, None, DEFAULT_MOVEABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_core() {
        let region = Region::parse_core(2, "a|b,0.5,0.25,radial,0.1,0.2").unwrap();
        assert_eq!(region.overlay_index, 2);
        assert_eq!(region.button, "a|b");
        assert_eq!(region.hitbox, HitboxKind::Radial);
        assert!((region.x - 0.5).abs() < f64::EPSILON);
        assert!((region.ry - 0.2).abs() < f64::EPSILON);
        assert_eq!(region.buttons().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_core_negative_numbers_allowed() {
        let region = Region::parse_core(0, "left,-10,20,rect,5,5").unwrap();
        assert!((region.x + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_core_errors() {
        assert!(Region::parse_core(0, "a,1,2,rect,3").is_err());
        assert!(Region::parse_core(0, "a,1,2,rect,3,4,5").is_err());
        assert!(Region::parse_core(0, "a,one,2,rect,3,4").is_err());
        assert!(Region::parse_core(0, "a,1,2,circle,3,4").is_err());
    }

    #[test]
    fn test_core_string() {
        let region = Region::new(0, "start", 1280.0, 0.5, HitboxKind::Rect, 12.0, 0.05);
        assert_eq!(region.core_string().unwrap(), "start,1280,0.5,rect,12,0.05");

        let empty = Region::new(0, "", 0.0, 0.0, HitboxKind::Rect, 1.0, 1.0);
        assert!(empty.core_string().is_err());
    }

    #[test]
    fn test_inheritance() {
        let overlay_defaults = DescriptorDefaults {
            normalized: Some(true),
            alpha_mod: Some(0.5),
            range_mod: None,
        };
        let mut region = Region::new(0, "a", 0.5, 0.5, HitboxKind::Radial, 0.1, 0.1);

        assert!(region.is_normalized(&overlay_defaults));
        assert!((region.effective_alpha_mod(&overlay_defaults) - 0.5).abs() < f64::EPSILON);
        assert!((region.effective_range_mod(&overlay_defaults) - 1.0).abs() < f64::EPSILON);

        region.alpha_mod = Some(0.9);
        region.normalized = Some(false);
        assert!(!region.is_normalized(&overlay_defaults));
        assert!((region.effective_alpha_mod(&overlay_defaults) - 0.9).abs() < f64::EPSILON);
        assert!(!region.is_moveable());
    }

    #[test]
    fn test_hitbox_contains() {
        assert!(HitboxKind::Rect.contains_offset(0.1, -0.1, 0.1, 0.1));
        assert!(!HitboxKind::Rect.contains_offset(0.11, 0.0, 0.1, 0.1));
        assert!(HitboxKind::Radial.contains_offset(0.0, 0.1, 0.1, 0.1));
        // Corner of the bounding box is outside the ellipse
        assert!(!HitboxKind::Radial.contains_offset(0.09, 0.09, 0.1, 0.1));
        assert!(!HitboxKind::Radial.contains_offset(0.0, 0.0, 0.0, 0.1));
    }
}
