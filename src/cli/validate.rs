//! Validation command for overlay files.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::services::OverlayService;
use crate::validator::{self, ValidationError, ValidationWarning};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate an overlay file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to overlay config file
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    valid: bool,
    errors: &'a [ValidationError],
    warnings: &'a [ValidationWarning],
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let text = OverlayService::read_text(&self.overlay)
            .map_err(|e| CliError::io(format!("Failed to load overlay file: {e:#}")))?;

        let report = validator::validate(&text);

        if self.json {
            print_json(&ValidationResponse {
                valid: report.is_valid(),
                errors: &report.errors,
                warnings: &report.warnings,
            })?;
        } else {
            if report.is_valid() {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            if !report.errors.is_empty() || !report.warnings.is_empty() {
                println!("\nIssues:");
                for error in &report.errors {
                    println!("  ✗ {error}");
                }
                for warning in &report.warnings {
                    println!("  ⚠ {warning}");
                }
            }
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
