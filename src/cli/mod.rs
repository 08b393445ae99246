//! CLI command handlers for LazyOverlay.
//!
//! This module provides headless, scriptable access to overlay validation,
//! inspection and transformation for automation and CI integration.

pub mod common;
pub mod config;
pub mod convert;
pub mod fmt;
pub mod inspect;
pub mod navigate;
pub mod portrait;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
pub use fmt::FmtArgs;
pub use inspect::InspectArgs;
pub use navigate::NavigateArgs;
pub use portrait::PortraitArgs;
pub use validate::ValidateArgs;
