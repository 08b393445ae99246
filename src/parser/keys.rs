//! Key naming for the overlay config format.
//!
//! Layout attributes live under `overlay{i}_{attr}`, descriptor attributes
//! under `overlay{i}_desc{j}_{attr}` and the descriptor tuple itself under
//! `overlay{i}_desc{j}`. All key strings are built and classified here.

use regex::Regex;
use std::sync::LazyLock;

/// Top-level key holding the number of overlays.
pub const OVERLAY_COUNT_KEY: &str = "overlays";

static KEY_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^overlay([0-9]+)_(?:desc([0-9]+)(?:_([a-z_]+))?|([a-z_]+))$").unwrap()
});

/// Attributes stored per overlay (layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayAttr {
    /// `name`
    Name,
    /// `overlay` (background image)
    Image,
    /// `rect` (background image rectangle)
    Rect,
    /// `full_screen`
    FullScreen,
    /// `aspect_ratio`
    AspectRatio,
    /// `block_x_separation`
    BlockXSeparation,
    /// `block_y_separation`
    BlockYSeparation,
    /// `normalized` (default for descriptors)
    Normalized,
    /// `alpha_mod` (default for descriptors)
    AlphaMod,
    /// `range_mod` (default for descriptors)
    RangeMod,
    /// `descs` (descriptor count)
    Descs,
}

impl OverlayAttr {
    /// Every overlay attribute, in the order they are written.
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Image,
        Self::Rect,
        Self::FullScreen,
        Self::AspectRatio,
        Self::BlockXSeparation,
        Self::BlockYSeparation,
        Self::Normalized,
        Self::AlphaMod,
        Self::RangeMod,
        Self::Descs,
    ];

    /// Key suffix for this attribute.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Image => "overlay",
            Self::Rect => "rect",
            Self::FullScreen => "full_screen",
            Self::AspectRatio => "aspect_ratio",
            Self::BlockXSeparation => "block_x_separation",
            Self::BlockYSeparation => "block_y_separation",
            Self::Normalized => "normalized",
            Self::AlphaMod => "alpha_mod",
            Self::RangeMod => "range_mod",
            Self::Descs => "descs",
        }
    }

    /// Looks up an attribute by key suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.suffix() == suffix)
    }
}

/// Attributes stored per descriptor (region), besides the core tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescAttr {
    /// `overlay` (region image)
    Image,
    /// `moveable`
    Moveable,
    /// `next_target`
    NextTarget,
    /// `saturate_pct`
    SaturatePct,
    /// `pct`, legacy spelling of `saturate_pct`
    Pct,
    /// `normalized`
    Normalized,
    /// `alpha_mod`
    AlphaMod,
    /// `range_mod`
    RangeMod,
}

impl DescAttr {
    /// Every descriptor attribute, in the order they are written.
    pub const ALL: [Self; 8] = [
        Self::Image,
        Self::Moveable,
        Self::NextTarget,
        Self::SaturatePct,
        Self::Pct,
        Self::Normalized,
        Self::AlphaMod,
        Self::RangeMod,
    ];

    /// Key suffix for this attribute.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Image => "overlay",
            Self::Moveable => "moveable",
            Self::NextTarget => "next_target",
            Self::SaturatePct => "saturate_pct",
            Self::Pct => "pct",
            Self::Normalized => "normalized",
            Self::AlphaMod => "alpha_mod",
            Self::RangeMod => "range_mod",
        }
    }

    /// Looks up an attribute by key suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.suffix() == suffix)
    }
}

/// Builds `overlay{i}_{attr}`.
#[must_use]
pub fn overlay_key(overlay: usize, attr: OverlayAttr) -> String {
    format!("overlay{overlay}_{}", attr.suffix())
}

/// Builds `overlay{i}_desc{j}`, the key of the descriptor tuple.
#[must_use]
pub fn desc_key(overlay: usize, desc: usize) -> String {
    format!("overlay{overlay}_desc{desc}")
}

/// Builds `overlay{i}_desc{j}_{attr}`.
#[must_use]
pub fn desc_attr_key(overlay: usize, desc: usize, attr: DescAttr) -> String {
    format!("overlay{overlay}_desc{desc}_{}", attr.suffix())
}

/// What a config key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// `overlays`
    OverlayCount,
    /// `overlay{i}_{attr}`
    Overlay {
        /// Overlay ordinal
        overlay: usize,
        /// Attribute
        attr: OverlayAttr,
    },
    /// `overlay{i}_desc{j}`
    DescCore {
        /// Overlay ordinal
        overlay: usize,
        /// Descriptor ordinal
        desc: usize,
    },
    /// `overlay{i}_desc{j}_{attr}`
    Desc {
        /// Overlay ordinal
        overlay: usize,
        /// Descriptor ordinal
        desc: usize,
        /// Attribute
        attr: DescAttr,
    },
    /// Anything outside the known vocabulary
    Unknown,
}

/// Classifies a config key.
#[must_use]
pub fn classify(key: &str) -> KeyKind {
    if key == OVERLAY_COUNT_KEY {
        return KeyKind::OverlayCount;
    }

    let Some(caps) = KEY_SHAPE_RE.captures(key) else {
        return KeyKind::Unknown;
    };
    let Ok(overlay) = caps[1].parse::<usize>() else {
        return KeyKind::Unknown;
    };

    if let Some(desc) = caps.get(2) {
        let Ok(desc) = desc.as_str().parse::<usize>() else {
            return KeyKind::Unknown;
        };
        return match caps.get(3) {
            None => KeyKind::DescCore { overlay, desc },
            Some(suffix) => DescAttr::from_suffix(suffix.as_str())
                .map_or(KeyKind::Unknown, |attr| KeyKind::Desc {
                    overlay,
                    desc,
                    attr,
                }),
        };
    }

    caps.get(4)
        .and_then(|suffix| OverlayAttr::from_suffix(suffix.as_str()))
        .map_or(KeyKind::Unknown, |attr| KeyKind::Overlay { overlay, attr })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builders() {
        assert_eq!(overlay_key(3, OverlayAttr::AlphaMod), "overlay3_alpha_mod");
        assert_eq!(overlay_key(0, OverlayAttr::Image), "overlay0_overlay");
        assert_eq!(desc_key(2, 7), "overlay2_desc7");
        assert_eq!(
            desc_attr_key(3, 1, DescAttr::AlphaMod),
            "overlay3_desc1_alpha_mod"
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("overlays"), KeyKind::OverlayCount);
        assert_eq!(
            classify("overlay0_descs"),
            KeyKind::Overlay {
                overlay: 0,
                attr: OverlayAttr::Descs
            }
        );
        assert_eq!(
            classify("overlay12_desc3"),
            KeyKind::DescCore {
                overlay: 12,
                desc: 3
            }
        );
        assert_eq!(
            classify("overlay1_desc0_next_target"),
            KeyKind::Desc {
                overlay: 1,
                desc: 0,
                attr: DescAttr::NextTarget
            }
        );
        assert_eq!(
            classify("overlay1_desc0_pct"),
            KeyKind::Desc {
                overlay: 1,
                desc: 0,
                attr: DescAttr::Pct
            }
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("overlay0_bogus"), KeyKind::Unknown);
        assert_eq!(classify("overlay0_desc1_bogus"), KeyKind::Unknown);
        assert_eq!(classify("input_overlay_opacity"), KeyKind::Unknown);
        assert_eq!(classify("overlayX_name"), KeyKind::Unknown);
    }

    #[test]
    fn test_suffix_round_trip() {
        for attr in OverlayAttr::ALL {
            assert_eq!(OverlayAttr::from_suffix(attr.suffix()), Some(attr));
        }
        for attr in DescAttr::ALL {
            assert_eq!(DescAttr::from_suffix(attr.suffix()), Some(attr));
        }
    }
}
