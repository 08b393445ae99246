//! Data models for overlay collections, overlays and regions.
//!
//! This module contains the structured view of an overlay config file.
//! Models are independent of the text format; see [`crate::parser`].

pub mod defaults;
pub mod input_overlay;
pub mod overlay;
pub mod rect;
pub mod region;
pub mod resolved;

// Re-export all model types
pub use defaults::DescriptorDefaults;
pub use input_overlay::InputOverlay;
pub use overlay::Overlay;
pub use rect::Rect;
pub use region::{HitboxKind, Region};
pub use resolved::{ResolvedOverlay, ResolvedRegion};
