//! Portrait relayout.
//!
//! Moves the controls of portrait overlays below two stacked emulated
//! screens at the top of the display and drops the extra shoulder buttons.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::config::PortraitConfig;
use crate::models::{HitboxKind, InputOverlay, Overlay};

/// Shoulder buttons with no counterpart on the target device.
static REMOVED_BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[lr][23]$").unwrap());

/// Face buttons, d-pad directions (and their diagonals), menu and left stick.
static SHIFTED_BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([abxy](\|[abxy])?|(up|down|left|right)(\|(up|down|left|right))?|menu_toggle|analog_left)$",
    )
    .unwrap()
});

/// Summary of a relayout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortraitReport {
    /// Ordinals of the overlays that were relaid out
    pub overlays: Vec<usize>,
    /// Vertical offset applied to shifted regions
    pub delta: f64,
    /// Number of regions removed
    pub removed: usize,
    /// Number of regions shifted
    pub shifted: usize,
}

/// Bottom edge of the stacked screens in normalized units.
#[must_use]
pub fn screens_bottom(portrait: &PortraitConfig) -> f64 {
    2.0 * portrait.device_width / portrait.screen_aspect / portrait.device_height
}

fn is_target(overlay: &Overlay, portrait: &PortraitConfig) -> bool {
    overlay.name.as_deref().is_some_and(|name| {
        name.starts_with(&portrait.name_prefix) && !name.ends_with(&portrait.hidden_suffix)
    })
}

/// Relayouts every portrait overlay in place.
///
/// The vertical offset is measured from the top edge of the first `rect`
/// hitbox bound to `up` in the first portrait overlay that has an `up`
/// region. Overlays are expected to use normalized coordinates.
///
/// # Errors
///
/// Returns an error if portrait overlays exist but none has a usable `up`
/// anchor. The collection is left unchanged in that case.
pub fn relayout_portrait(
    overlays: &mut InputOverlay,
    portrait: &PortraitConfig,
) -> Result<PortraitReport> {
    let targets: Vec<usize> = overlays
        .iter()
        .enumerate()
        .filter(|(_, overlay)| is_target(overlay, portrait))
        .map(|(index, _)| index)
        .collect();

    if targets.is_empty() {
        tracing::info!("No portrait overlays found, nothing to do");
        return Ok(PortraitReport::default());
    }

    let anchor_overlay = targets
        .iter()
        .filter_map(|&index| overlays.get(index))
        .find(|overlay| overlay.regions.iter().any(|r| r.button == "up"))
        .context("No portrait overlay has an 'up' region to anchor the d-pad")?;

    let anchor = anchor_overlay
        .regions
        .iter()
        .find(|r| r.button == "up" && r.hitbox == HitboxKind::Rect)
        .with_context(|| {
            format!(
                "Portrait overlay '{}' has no rect 'up' region",
                anchor_overlay.name.as_deref().unwrap_or_default()
            )
        })?;

    let delta = screens_bottom(portrait) - (anchor.y - anchor.ry);
    tracing::debug!(delta, "Portrait d-pad offset");

    let mut report = PortraitReport {
        overlays: targets.clone(),
        delta,
        ..PortraitReport::default()
    };

    for index in targets {
        let Some(overlay) = overlays.get_mut(index) else {
            continue;
        };

        let before = overlay.regions.len();
        overlay
            .regions
            .retain(|region| !REMOVED_BUTTON_RE.is_match(&region.button));
        report.removed += before - overlay.regions.len();

        for region in &mut overlay.regions {
            if SHIFTED_BUTTON_RE.is_match(&region.button) {
                region.y += delta;
                report.shifted += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn region(button: &str, y: f64, hitbox: HitboxKind) -> Region {
        Region::new(0, button, 0.5, y, hitbox, 0.05, 0.05)
    }

    fn portrait_overlay(name: &str) -> Overlay {
        let mut overlay = Overlay::named(name);
        overlay.defaults.normalized = Some(true);
        overlay.regions = vec![
            region("up", 0.7, HitboxKind::Radial),
            region("up", 0.6, HitboxKind::Rect),
            region("a", 0.65, HitboxKind::Radial),
            region("up|left", 0.6, HitboxKind::Radial),
            region("l2", 0.1, HitboxKind::Rect),
            region("r3", 0.1, HitboxKind::Rect),
            region("l", 0.1, HitboxKind::Rect),
            region("select", 0.9, HitboxKind::Rect),
        ];
        overlay
    }

    #[test]
    fn test_screens_bottom() {
        let bottom = screens_bottom(&PortraitConfig::default());
        assert!((bottom - 2160.0 / 2960.0).abs() < 1e-12);
    }

    #[test]
    fn test_relayout_portrait() {
        let config = PortraitConfig::default();
        let mut collection = InputOverlay::new();
        collection.push(Overlay::named("landscape"));
        collection.push(portrait_overlay("portrait"));

        let report = relayout_portrait(&mut collection, &config).unwrap();

        // Anchor is the rect `up`, not the radial one listed first
        let expected_delta = screens_bottom(&config) - (0.6 - 0.05);
        assert!((report.delta - expected_delta).abs() < 1e-12);
        assert_eq!(report.overlays, vec![1]);
        assert_eq!(report.removed, 2);
        assert_eq!(report.shifted, 4);

        let overlay = collection.get(1).unwrap();
        let buttons: Vec<&str> = overlay.regions.iter().map(|r| r.button.as_str()).collect();
        assert_eq!(buttons, vec!["up", "up", "a", "up|left", "l", "select"]);
        assert!((overlay.regions[2].y - (0.65 + expected_delta)).abs() < 1e-12);
        // Not matched by either pattern
        assert!((overlay.regions[4].y - 0.1).abs() < f64::EPSILON);
        assert!((overlay.regions[5].y - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hidden_overlays_are_skipped() {
        let mut collection = InputOverlay::new();
        collection.push(portrait_overlay("portrait"));
        collection.push(portrait_overlay("portrait-hidden"));

        let report = relayout_portrait(&mut collection, &PortraitConfig::default()).unwrap();
        assert_eq!(report.overlays, vec![0]);
        assert_eq!(collection.get(1).unwrap().regions.len(), 8);
    }

    #[test]
    fn test_no_portrait_overlays_is_noop() {
        let mut collection = InputOverlay::new();
        collection.push(portrait_overlay("landscape"));
        let before = collection.clone();

        let report = relayout_portrait(&mut collection, &PortraitConfig::default()).unwrap();
        assert!(report.overlays.is_empty());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_missing_anchor_is_error() {
        let mut overlay = Overlay::named("portrait");
        overlay.regions.push(region("a", 0.5, HitboxKind::Radial));
        let mut collection = InputOverlay::new();
        collection.push(overlay);
        let before = collection.clone();

        assert!(relayout_portrait(&mut collection, &PortraitConfig::default()).is_err());
        assert_eq!(collection, before);

        let mut overlay = Overlay::named("portrait");
        overlay.regions.push(region("up", 0.5, HitboxKind::Radial));
        let mut collection = InputOverlay::new();
        collection.push(overlay);
        let err = relayout_portrait(&mut collection, &PortraitConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no rect 'up' region"));
    }
}
