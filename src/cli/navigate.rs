//! Navigate command: activate one region and report the outcome.

use crate::cli::common::{load_overlays, print_json, CliError, CliResult};
use crate::navigation::{Activation, OverlaySession};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Activate a descriptor and show whether it switches overlays or emits a button
#[derive(Debug, Clone, Args)]
pub struct NavigateArgs {
    /// Path to overlay config file
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Overlay to start from, by name or ordinal
    #[arg(short, long, value_name = "NAME|INDEX")]
    pub layout: String,

    /// Descriptor ordinal within that overlay
    #[arg(short, long, value_name = "J")]
    pub region: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct NavigateResult<'a> {
    #[serde(flatten)]
    activation: &'a Activation,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<&'a str>,
}

impl NavigateArgs {
    /// Execute the navigate command
    pub fn execute(&self) -> CliResult<()> {
        let overlays = load_overlays(&self.overlay)?;

        let (start, _) = overlays.find(&self.layout).ok_or_else(|| {
            CliError::validation(format!("No overlay named '{}'", self.layout))
        })?;

        let mut session = OverlaySession::starting_at(&overlays, start);
        let activation = session
            .activate(self.region)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let active = session.active().and_then(|o| o.name.as_deref());

        if self.json {
            print_json(&NavigateResult {
                activation: &activation,
                active,
            })?;
        } else {
            match &activation {
                Activation::Switched { from, to } => {
                    println!(
                        "Next Layout: {} (overlay {from} -> {to})",
                        active.unwrap_or("<unnamed>")
                    );
                }
                Activation::Button { button } => println!("Button: {button}"),
            }
        }

        Ok(())
    }
}
