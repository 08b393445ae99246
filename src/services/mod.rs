//! Service layer for business logic.
//!
//! This module contains services that encapsulate whole-collection
//! operations and the file I/O around them.

pub mod overlays;
pub mod portrait;
pub mod remap;

// Re-export commonly used types and functions
pub use overlays::OverlayService;
pub use portrait::{relayout_portrait, PortraitReport};
pub use remap::{remap_overlays, Canvas, CoordinateMode, RemapEntry};
