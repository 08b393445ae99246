//! The collection of overlays described by one config file.

use crate::models::resolved::ResolvedRegion;
use crate::models::{Overlay, Region};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered overlays, addressable by ordinal or by name.
///
/// Names are not required to be unique; lookups by name return the first
/// overlay carrying that name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputOverlay {
    /// Overlays in ordinal order
    pub overlays: Vec<Overlay>,
}

impl InputOverlay {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Returns true if there are no overlays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Appends an overlay, pointing its regions back at its new ordinal.
    pub fn push(&mut self, mut overlay: Overlay) {
        let index = self.overlays.len();
        for region in &mut overlay.regions {
            region.overlay_index = index;
        }
        self.overlays.push(overlay);
    }

    /// Overlay by ordinal.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index)
    }

    /// Mutable overlay by ordinal.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Overlay> {
        self.overlays.get_mut(index)
    }

    /// First overlay with the given name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.has_name(name))
    }

    /// Ordinal of the first overlay with the given name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.overlays.iter().position(|o| o.has_name(name))
    }

    /// Looks up an overlay by a name or, failing that, a decimal ordinal.
    #[must_use]
    pub fn find(&self, name_or_index: &str) -> Option<(usize, &Overlay)> {
        if let Some(idx) = self.index_of(name_or_index) {
            return Some((idx, &self.overlays[idx]));
        }
        let idx = name_or_index.parse::<usize>().ok()?;
        self.get(idx).map(|o| (idx, o))
    }

    /// Iterates overlays in order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    /// Iterates overlays mutably in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Overlay> {
        self.overlays.iter_mut()
    }

    /// Resolves a region against the overlay it belongs to.
    ///
    /// Returns `None` if the region's back-reference points nowhere or the
    /// region is not part of that overlay.
    #[must_use]
    pub fn resolve_region(&self, region: &Region) -> Option<ResolvedRegion> {
        let parent = self.get(region.overlay_index)?;
        let index = parent
            .regions
            .iter()
            .position(|candidate| std::ptr::eq(candidate, region))
            .or_else(|| parent.regions.iter().position(|candidate| candidate == region))?;
        Some(ResolvedRegion::new(index, region, &parent.defaults))
    }

    /// Names carried by more than one overlay, in first-seen order.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for name in self.overlays.iter().filter_map(|o| o.name.as_deref()) {
            if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
                duplicates.push(name.to_string());
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HitboxKind;

    fn sample() -> InputOverlay {
        let mut collection = InputOverlay::new();

        let mut a = Overlay::named("a");
        a.defaults.alpha_mod = Some(0.5);
        a.regions
            .push(Region::new(99, "x", 0.5, 0.5, HitboxKind::Rect, 0.1, 0.1));
        collection.push(a);

        collection.push(Overlay::named("b"));
        collection.push(Overlay::named("a"));
        collection
    }

    #[test]
    fn test_push_sets_back_reference() {
        let collection = sample();
        assert_eq!(collection.overlays[0].regions[0].overlay_index, 0);
    }

    #[test]
    fn test_lookup_by_name_is_first_match() {
        let collection = sample();
        assert_eq!(collection.index_of("a"), Some(0));
        assert_eq!(collection.index_of("b"), Some(1));
        assert_eq!(collection.index_of("c"), None);
        assert!(collection.get_by_name("b").is_some());
    }

    #[test]
    fn test_find_by_name_or_index() {
        let collection = sample();
        assert_eq!(collection.find("b").map(|(i, _)| i), Some(1));
        assert_eq!(collection.find("2").map(|(i, _)| i), Some(2));
        assert!(collection.find("7").is_none());
    }

    #[test]
    fn test_resolve_region_uses_parent_defaults() {
        let collection = sample();
        let region = &collection.overlays[0].regions[0];
        let resolved = collection.resolve_region(region).unwrap();
        assert!((resolved.alpha_mod - 0.5).abs() < f64::EPSILON);
        assert_eq!(resolved.index, 0);
    }

    #[test]
    fn test_duplicate_names() {
        let collection = sample();
        assert_eq!(collection.duplicate_names(), vec!["a".to_string()]);
    }
}
