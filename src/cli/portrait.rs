//! Portrait command: relayout portrait overlays below the emulated screens.

use crate::cli::common::{load_overlays, print_json, save_overlays, CliError, CliResult};
use crate::config::Config;
use crate::services::portrait::relayout_portrait;
use clap::Args;
use std::path::PathBuf;

/// Move portrait controls below the stacked screens and drop extra shoulder buttons
#[derive(Debug, Clone, Args)]
pub struct PortraitArgs {
    /// Path to overlay config file (normalized coordinates)
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Output file (defaults to FILE.new)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a JSON summary
    #[arg(long)]
    pub json: bool,
}

impl PortraitArgs {
    /// Execute the portrait command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let mut overlays = load_overlays(&self.overlay)?;
        let report = relayout_portrait(&mut overlays, &config.portrait)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let output = self.output.clone().unwrap_or_else(|| {
            let mut path = self.overlay.clone().into_os_string();
            path.push(".new");
            PathBuf::from(path)
        });
        save_overlays(&overlays, &output)?;

        if self.json {
            print_json(&report)?;
        } else {
            println!(
                "Relaid out {} overlays: {} descriptors shifted by {:.4}, {} removed",
                report.overlays.len(),
                report.shifted,
                report.delta,
                report.removed
            );
            println!("✓ Wrote {}", output.display());
        }

        Ok(())
    }
}
