//! LazyOverlay - command-line tool for input overlay config files
//!
//! Validates, inspects, formats and transforms overlay `.cfg` files.

use clap::{Parser, Subcommand};
use lazyoverlay::cli::{
    CliError, ConfigArgs, ConvertArgs, ExitCode, FmtArgs, InspectArgs, NavigateArgs,
    PortraitArgs, ValidateArgs,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LazyOverlay - command-line tool for input overlay config files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an overlay file
    Validate(ValidateArgs),
    /// Show overlays with defaults applied
    Inspect(InspectArgs),
    /// Rewrite an overlay file in canonical form
    Fmt(FmtArgs),
    /// Convert coordinates between absolute and normalized units
    Convert(ConvertArgs),
    /// Activate a descriptor and report the outcome
    Navigate(NavigateArgs),
    /// Relayout portrait overlays below the emulated screens
    Portrait(PortraitArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> Result<(), CliError> {
        match self {
            Self::Validate(args) => args.execute(),
            Self::Inspect(args) => args.execute(),
            Self::Fmt(args) => args.execute(),
            Self::Convert(args) => args.execute(),
            Self::Navigate(args) => args.execute(),
            Self::Portrait(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.code.into());
    }

    std::process::exit(ExitCode::Success.into());
}
