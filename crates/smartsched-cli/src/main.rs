//! # smartsched CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use smartsched_cli::serve::{run_serve, ServeArgs};
use smartsched_cli::validate::{run_validate, ValidateArgs};
use smartsched_cli::verify::{run_verify, VerifyArgs};

/// SmartSched attendance tools.
///
/// Face-match comparison and location/time constraint validation are
/// delegated to a hosted generative model; these tools exercise the same
/// collaborators the API server uses.
#[derive(Parser, Debug)]
#[command(name = "smartsched", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),

    /// Compare two face images with the hosted model.
    #[command(name = "verify-face")]
    Verify(VerifyArgs),

    /// Validate an attendance attempt's location and time constraints.
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args).await,
        Commands::Verify(args) => run_verify(&args).await,
        Commands::Validate(args) => run_validate(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
