//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and config locations.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "LazyOverlay";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "lazyoverlay";

/// Environment variable overriding the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "LAZYOVERLAY_CONFIG_DIR";
