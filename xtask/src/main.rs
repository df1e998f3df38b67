//! Workspace quality tool.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run all quality checks, reporting failures
//! - `cargo xtask check --ci` - Same checks, exit non-zero on any failure
//! - `cargo xtask ci` - Full CI suite with a step-by-step summary

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Quality checks for the mesh-extrude workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for mesh-extrude", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Run in CI mode (fails on any issue)
        #[arg(long)]
        ci: bool,
    },

    /// Run full CI suite
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
    }
}
