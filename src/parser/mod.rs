//! Parsing and serialization of overlay config files.
//!
//! The text format is handled in two layers: [`value`] and [`flat`] turn
//! text into an ordered key/value mapping, [`overlay`] and [`overlay_gen`]
//! convert between that mapping and the structured models. Key names are
//! built in one place, [`keys`].

pub mod flat;
pub mod keys;
pub mod overlay;
pub mod overlay_gen;
pub mod value;

// Re-export commonly used functions
pub use flat::{FlatConfig, ParseWarning};
pub use overlay::{decode_overlays, parse_overlay_file, parse_overlay_str};
pub use overlay_gen::{encode_overlays, generate_cfg, save_overlay_file};
pub use value::ConfigValue;
