//! Format command: rewrite an overlay file in canonical form.

use crate::cli::common::{load_overlays, save_overlays, CliError, CliResult};
use crate::parser::generate_cfg;
use crate::services::OverlayService;
use clap::Args;
use std::path::PathBuf;

/// Rewrite an overlay file in canonical form
///
/// Comments, unknown keys and values equal to their defaults are dropped;
/// keys are written in a fixed order.
#[derive(Debug, Clone, Args)]
pub struct FmtArgs {
    /// Path to overlay config file
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Write to this file instead of rewriting the input
    #[arg(long, value_name = "FILE", conflicts_with = "check")]
    pub output: Option<PathBuf>,

    /// Only check whether the file is already canonical
    #[arg(long)]
    pub check: bool,
}

impl FmtArgs {
    /// Execute the fmt command
    pub fn execute(&self) -> CliResult<()> {
        let overlays = load_overlays(&self.overlay)?;

        if self.check {
            let original = OverlayService::read_text(&self.overlay)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            let canonical = generate_cfg(&overlays)
                .map_err(|e| CliError::validation(format!("Failed to encode overlays: {e:#}")))?;

            if original == canonical {
                println!("✓ {} is canonical", self.overlay.display());
                return Ok(());
            }
            return Err(CliError::validation(format!(
                "{} is not in canonical form",
                self.overlay.display()
            )));
        }

        let output = self.output.as_ref().unwrap_or(&self.overlay);
        save_overlays(&overlays, output)?;
        println!("✓ Wrote {}", output.display());

        Ok(())
    }
}
