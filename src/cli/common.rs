//! Shared types for CLI command handlers.

use crate::models::InputOverlay;
use crate::parser::{encode_overlays, parse_overlay_str};
use crate::services::OverlayService;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but is invalid, or an operation was rejected
    ValidationError = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Error returned by a command handler.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code the process should terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or rejected operation (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads an overlay file, separating read failures from decode failures.
pub fn load_overlays(path: &Path) -> CliResult<InputOverlay> {
    let text = OverlayService::read_text(path)
        .map_err(|e| CliError::io(format!("Failed to load overlay file: {e:#}")))?;
    parse_overlay_str(&text)
        .map_err(|e| CliError::validation(format!("Failed to decode {}: {e:#}", path.display())))
}

/// Writes overlays atomically.
pub fn save_overlays(overlays: &InputOverlay, path: &Path) -> CliResult<()> {
    encode_overlays(overlays)
        .map_err(|e| CliError::validation(format!("Failed to encode overlays: {e:#}")))?;
    OverlayService::save(overlays, path).map_err(|e| CliError::io(format!("{e:#}")))
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
