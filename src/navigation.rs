//! Navigation between overlays.
//!
//! A session tracks which overlay of a collection is active and applies the
//! switch-on-activation behavior of regions carrying a next target.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{InputOverlay, Overlay, ResolvedRegion};

/// Outcome of activating a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Activation {
    /// The region named another overlay, which is now active
    Switched {
        /// Ordinal active before the switch
        from: usize,
        /// Ordinal active after the switch
        to: usize,
    },
    /// The region emits its button
    Button {
        /// Button identifier
        button: String,
    },
}

/// Active-overlay state over a borrowed collection.
#[derive(Debug, Clone)]
pub struct OverlaySession<'a> {
    overlays: &'a InputOverlay,
    active: usize,
}

impl<'a> OverlaySession<'a> {
    /// Starts a session on the first overlay.
    #[must_use]
    pub const fn new(overlays: &'a InputOverlay) -> Self {
        Self {
            overlays,
            active: 0,
        }
    }

    /// Starts a session on `index`, falling back to the first overlay when
    /// the index is out of range.
    #[must_use]
    pub fn starting_at(overlays: &'a InputOverlay, index: usize) -> Self {
        let active = if index < overlays.len() { index } else { 0 };
        Self { overlays, active }
    }

    /// Ordinal of the active overlay.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The active overlay, if the collection is not empty.
    #[must_use]
    pub fn active(&self) -> Option<&'a Overlay> {
        self.overlays.get(self.active)
    }

    /// Makes the first overlay named `name` active.
    ///
    /// # Errors
    ///
    /// Returns an error if no overlay has that name; the active overlay is
    /// unchanged.
    pub fn switch_to(&mut self, name: &str) -> Result<usize> {
        let Some(index) = self.overlays.index_of(name) else {
            tracing::error!("Cannot find overlay for '{name}'");
            anyhow::bail!("Cannot find overlay for '{name}'");
        };

        tracing::debug!(from = self.active, to = index, "Switching overlay to '{name}'");
        self.active = index;
        Ok(index)
    }

    /// Activates region `region` of the active overlay.
    ///
    /// Regions with a next target switch overlays; all others report their
    /// button.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is empty, the region does not exist
    /// or the target names no overlay.
    pub fn activate(&mut self, region: usize) -> Result<Activation> {
        let overlay = self.active().context("No active overlay")?;
        let target = overlay.regions.get(region).with_context(|| {
            format!(
                "Overlay {} has no descriptor {region} ({} descriptors)",
                self.active,
                overlay.regions.len()
            )
        })?;

        match &target.next_target {
            Some(name) => {
                let from = self.active;
                let to = self.switch_to(name)?;
                Ok(Activation::Switched { from, to })
            }
            None => {
                tracing::debug!("Button: {}", target.button);
                Ok(Activation::Button {
                    button: target.button.clone(),
                })
            }
        }
    }

    /// First region of the active overlay whose hitbox contains the point.
    ///
    /// The point is given in the regions' own coordinate space.
    #[must_use]
    pub fn hit(&self, x: f64, y: f64) -> Option<ResolvedRegion> {
        let overlay = self.active()?;
        overlay
            .regions
            .iter()
            .enumerate()
            .map(|(index, region)| ResolvedRegion::new(index, region, &overlay.defaults))
            .find(|resolved| resolved.contains(x, y))
    }
}
