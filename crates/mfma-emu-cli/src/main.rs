use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Top-level CLI argument parser for the `mfma` command
#[derive(Parser)]
#[command(
    name = "mfma",
    about = "mfma-emu — AMDGPU MFMA instructions on CPU threads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Launch options shared by `run` and `verify`
#[derive(clap::Args, Debug, Clone, Default)]
struct LaunchArgs {
    /// Operand fixture: identity, ramp, or zeros
    #[arg(long)]
    fixture: Option<String>,
    /// Path to a YAML launch config (flags override its values)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of launches on the same subgroup
    #[arg(long)]
    repeat: Option<u32>,
}

/// Available subcommands for the `mfma` CLI
#[derive(Subcommand)]
enum Commands {
    /// Print A, B and C, launch the kernel, and print the result
    Run {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Check launches against the scalar reference and each other
    Verify {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Print which tile coordinates and staging slots each lane owns
    Layout,
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run { launch } => {
            let config = commands::resolve_config(&launch)?;
            commands::run::run(&config)
        }
        Commands::Verify { launch } => {
            let config = commands::resolve_config(&launch)?;
            commands::verify::run(&config)
        }
        Commands::Layout => commands::layout::run(),
    }
}

/// Entry point: install logging, parse CLI arguments, and run the subcommand
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
