//! Redox Layout Editor - keymap editor for the Redox keyboard
//!
//! Edits layered layouts stored as JSON and generates QMK `keymap.c` files.

use clap::{Parser, Subcommand};
use redox_layout_editor::branding::{APP_BINARY_NAME, APP_DESCRIPTION};
use redox_layout_editor::cli::{
    CliError, CliResult, GenerateArgs, KeyArgs, LayerArgs, NewArgs, ShellArgs, ShowArgs,
    ValidateArgs,
};
use redox_layout_editor::config::Config;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redox Layout Editor - layered keymap editor for the Redox keyboard
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the platform default
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new layout file with a single empty layer
    New(NewArgs),
    /// List, add, remove or rename layers
    Layer(LayerArgs),
    /// Bind or clear keys
    Key(KeyArgs),
    /// Show one layer as a key grid
    Show(ShowArgs),
    /// Generate keymap.c
    Generate(GenerateArgs),
    /// Check a layout for export problems
    Validate(ValidateArgs),
    /// Edit a layout interactively
    Shell(ShellArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> CliResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_ref())?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::New(args) => args.execute(&config),
        Commands::Layer(args) => args.execute(&config),
        Commands::Key(args) => args.execute(&config),
        Commands::Show(args) => args.execute(&config),
        Commands::Generate(args) => args.execute(&config),
        Commands::Validate(args) => args.execute(&config),
        Commands::Shell(args) => args.execute(&config).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::from(u8::from(e.exit_code()))
        }
    }
}
