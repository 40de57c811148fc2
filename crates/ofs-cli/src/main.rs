//! # ofs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ofs_cli::build::{run_build, BuildArgs};
use ofs_cli::simulate::{run_simulate, SimulateArgs};
use ofs_cli::sub::{run_sub, SubArgs};

/// Oracle Functions Stack CLI.
///
/// Builds deployable script artifacts, simulates scripts in the local
/// sandbox, and administers billing subscriptions.
#[derive(Parser, Debug)]
#[command(name = "ofs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build script artifacts and the digest manifest.
    Build(BuildArgs),

    /// Simulate a script locally under the sandbox limits.
    Simulate(SimulateArgs),

    /// Subscription billing administration.
    Sub(SubArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Build(args) => run_build(&args),
        Commands::Simulate(args) => run_simulate(&args),
        Commands::Sub(args) => run_sub(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
