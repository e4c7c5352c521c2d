//! # hwsha CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hwsha_cli::device::{run_device, DeviceArgs};
use hwsha_cli::hash::{run_hash, HashArgs};
use hwsha_cli::load_config;
use hwsha_cli::selftest::run_selftest;

/// hwsha — SHA-256 engine and register-device toolkit.
#[derive(Parser, Debug)]
#[command(name = "hwsha", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a device configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hash a string, file, hex bytes, or stdin.
    Hash(HashArgs),

    /// Hash one line through the register device and read the result back.
    Device(DeviceArgs),

    /// Run the known-answer vectors through engine and device.
    Selftest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Hash(args) => run_hash(args),
        Commands::Device(args) => run_device(args, &config),
        Commands::Selftest => run_selftest(&config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
