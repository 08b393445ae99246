//! Format-wide attribute defaults and the inheritance resolver.
//!
//! Descriptor attributes fall back to the owning overlay's default, then to a
//! fixed format-wide value. Overlay attributes only have the fixed value.

use crate::models::Rect;
use serde::{Deserialize, Serialize};

/// Descriptors use absolute (pixel) coordinates unless told otherwise.
pub const DEFAULT_NORMALIZED: bool = false;
/// Default alpha modifier.
pub const DEFAULT_ALPHA_MOD: f64 = 1.0;
/// Default range modifier.
pub const DEFAULT_RANGE_MOD: f64 = 1.0;
/// Descriptors are fixed in place by default.
pub const DEFAULT_MOVEABLE: bool = false;

/// Default overlay aspect ratio.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;
/// Default for both block separation flags.
pub const DEFAULT_BLOCK_SEPARATION: bool = false;
/// Default fullscreen flag.
pub const DEFAULT_FULLSCREEN: bool = false;
/// Default background image rectangle.
pub const DEFAULT_IMAGE_RECT: Rect = Rect::UNIT;

/// Three-tier lookup: own value, then parent value, then the fixed default.
#[must_use]
pub fn resolve<T: Copy>(own: Option<T>, parent: Option<T>, fallback: T) -> T {
    own.or(parent).unwrap_or(fallback)
}

/// Per-overlay defaults inherited by every descriptor of that overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorDefaults {
    /// `overlay{i}_normalized`
    pub normalized: Option<bool>,
    /// `overlay{i}_alpha_mod`
    pub alpha_mod: Option<f64>,
    /// `overlay{i}_range_mod`
    pub range_mod: Option<f64>,
}

impl DescriptorDefaults {
    /// Effective coordinate mode at overlay level.
    #[must_use]
    pub fn normalized(&self) -> bool {
        self.normalized.unwrap_or(DEFAULT_NORMALIZED)
    }

    /// Effective alpha modifier at overlay level.
    #[must_use]
    pub fn alpha_mod(&self) -> f64 {
        self.alpha_mod.unwrap_or(DEFAULT_ALPHA_MOD)
    }

    /// Effective range modifier at overlay level.
    #[must_use]
    pub fn range_mod(&self) -> f64 {
        self.range_mod.unwrap_or(DEFAULT_RANGE_MOD)
    }
}
