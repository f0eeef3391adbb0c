//! xtcas CLI - command-line driver for the traffic interface
//!
//! Runs synthetic sessions against the traffic interface and manages the
//! configuration file.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "xtcas")]
#[command(version = xtcas::VERSION)]
#[command(about = "Traffic position interface for X-Plane TCAS", long_about = None)]
struct Cli {
    /// Use this config file instead of ~/.xtcas/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic session with scripted traffic
    Simulate(SimulateArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args, cli.config.as_deref()),
        Commands::Config(command) => commands::config::run(command, cli.config.as_deref()),
    };

    if let Err(e) = result {
        e.exit();
    }
}
