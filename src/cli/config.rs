//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Landscape canvas width used by `convert`
    #[arg(long)]
    width: Option<f64>,

    /// Landscape canvas height used by `convert`
    #[arg(long)]
    height: Option<f64>,

    /// Name substring marking landscape overlays
    #[arg(long, value_name = "TEXT")]
    landscape_marker: Option<String>,

    /// Device width in portrait orientation
    #[arg(long)]
    device_width: Option<f64>,

    /// Device height in portrait orientation
    #[arg(long)]
    device_height: Option<f64>,

    /// Width / height of one emulated screen
    #[arg(long)]
    screen_aspect: Option<f64>,

    /// Name prefix selecting portrait overlays
    #[arg(long, value_name = "TEXT")]
    portrait_prefix: Option<String>,

    /// Name suffix excluding overlays from the portrait relayout
    #[arg(long, value_name = "TEXT")]
    hidden_suffix: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.landscape_marker.is_none()
            && self.device_width.is_none()
            && self.device_height.is_none()
            && self.screen_aspect.is_none()
            && self.portrait_prefix.is_none()
            && self.hidden_suffix.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified (see `config set --help`)",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(width) = self.width {
            config.remap.width = width;
        }
        if let Some(height) = self.height {
            config.remap.height = height;
        }
        if let Some(marker) = &self.landscape_marker {
            config.remap.landscape_marker.clone_from(marker);
        }
        if let Some(width) = self.device_width {
            config.portrait.device_width = width;
        }
        if let Some(height) = self.device_height {
            config.portrait.device_height = height;
        }
        if let Some(aspect) = self.screen_aspect {
            config.portrait.screen_aspect = aspect;
        }
        if let Some(prefix) = &self.portrait_prefix {
            config.portrait.name_prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.hidden_suffix {
            config.portrait.hidden_suffix.clone_from(suffix);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("LazyOverlay Configuration");
    println!("=========================");
    println!();

    println!("Remap:");
    println!(
        "  Canvas: {}x{} (landscape), {}x{} (other)",
        config.remap.width, config.remap.height, config.remap.height, config.remap.width
    );
    println!("  Landscape Marker: {}", config.remap.landscape_marker);
    println!();

    println!("Portrait:");
    println!(
        "  Device: {}x{}",
        config.portrait.device_width, config.portrait.device_height
    );
    println!("  Screen Aspect: {:.4}", config.portrait.screen_aspect);
    println!("  Name Prefix: {}", config.portrait.name_prefix);
    println!("  Hidden Suffix: {}", config.portrait.hidden_suffix);
    println!();
}
