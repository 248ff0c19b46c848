//! Fable CLI - multilingual fable widget.
//!
//! Provides commands for:
//! - `render`: Render a markdown file the way the widget does
//! - `resolve`: Resolve a fable document and print its HTML
//! - `catalog`: List the known fables
//! - `tabs`: Inspect and change the persisted tab assignments

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, RenderArgs, ResolveArgs, TabsCommand};
use error::CliError;
use output::Output;

/// Fable - multilingual fable widget.
#[derive(Parser)]
#[command(name = "fable", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover fable.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (show resolution and persistence logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to sanitized HTML.
    Render(RenderArgs),
    /// Resolve a fable document and print it as HTML.
    Resolve(ResolveArgs),
    /// List known fables.
    Catalog(CatalogArgs),
    /// Tab language assignment commands.
    #[command(subcommand)]
    Tabs(TabsCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Resolve(args) => runtime()?.block_on(args.execute(config_path)),
        Commands::Catalog(args) => {
            args.execute();
            Ok(())
        }
        Commands::Tabs(cmd) => runtime()?.block_on(cmd.execute(config_path)),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Runtime::new()?)
}
