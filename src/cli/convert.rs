//! Convert command: remap coordinates between normalized and pixel units.

use crate::cli::common::{load_overlays, print_json, save_overlays, CliError, CliResult};
use crate::config::Config;
use crate::services::overlays::derived_path;
use crate::services::remap::{remap_overlays, CoordinateMode};
use clap::Args;
use std::path::PathBuf;

/// Convert overlay coordinates to absolute or normalized units
///
/// Overlays whose name contains the landscape marker use the configured
/// canvas, all others the same canvas rotated.
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Path to overlay config file
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Target units (absolute or normalized)
    #[arg(long, value_name = "MODE")]
    pub to: String,

    /// Landscape canvas width, overrides the config
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Landscape canvas height, overrides the config
    #[arg(long, requires = "width")]
    pub height: Option<f64>,

    /// Output file (defaults to FILE-abs.cfg or FILE-norm.cfg)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a JSON summary of the remap
    #[arg(long)]
    pub json: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let target = match self.to.to_lowercase().as_str() {
            "absolute" | "abs" => CoordinateMode::Absolute,
            "normalized" | "norm" => CoordinateMode::Normalized,
            _ => {
                return Err(CliError::validation(
                    "Invalid target. Must be 'absolute' or 'normalized'",
                ))
            }
        };

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        if let (Some(width), Some(height)) = (self.width, self.height) {
            config.remap.width = width;
            config.remap.height = height;
        }
        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let mut overlays = load_overlays(&self.overlay)?;
        let entries = remap_overlays(&mut overlays, target, &config.remap)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let output = self.output.clone().unwrap_or_else(|| {
            let suffix = match target {
                CoordinateMode::Absolute => "-abs",
                CoordinateMode::Normalized => "-norm",
            };
            derived_path(&self.overlay, suffix)
        });
        save_overlays(&overlays, &output)?;

        if self.json {
            print_json(&entries)?;
        } else {
            for entry in &entries {
                let name = entry.name.as_deref().unwrap_or("<unnamed>");
                if entry.skipped {
                    println!("  - {name}: already {}", self.to.to_lowercase());
                } else {
                    println!(
                        "  ✓ {name}: {}x{}",
                        entry.canvas.width, entry.canvas.height
                    );
                }
            }
            println!("✓ Wrote {}", output.display());
        }

        Ok(())
    }
}
