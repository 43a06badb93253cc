//! fwprep CLI - sidebar generator for interview-preparation notes.
//!
//! Provides commands for:
//! - `sidebar`: Build the sidebar JSON for the site framework
//! - `list`: Print the discovered sections and pages

mod commands;
mod error;
mod output;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{ListArgs, SidebarArgs};
use output::Output;

/// fwprep - sidebar generator for interview-preparation notes.
#[derive(Parser)]
#[command(name = "fwprep", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sidebar navigation JSON.
    Sidebar(SidebarArgs),
    /// List discovered sections and pages.
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Sidebar(args) => args.verbose,
        Commands::List(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    // Logs go to stderr; stdout may carry the sidebar JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sidebar(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
