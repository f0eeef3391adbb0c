//! Configuration management CLI commands.

use std::path::Path;

use clap::Subcommand;
use xtcas::config::{config_file_path, ConfigFile};

use crate::error::CliError;
use crate::runner::load_config;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(config_path),
        ConfigCommands::Init { force } => run_init(&path, force),
    }
}

fn run_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let sim = &config.simulation;

    println!("[sampler]");
    println!("  interval       = {}s", config.sampler.interval);
    println!("[flight_loop]");
    println!("  interval       = {}s", config.flight_loop.interval);
    println!("[logging]");
    println!("  file           = {}", config.logging.file.display());
    println!("[simulation]");
    println!("  reference      = {}", sim.reference());
    println!("  traffic        = {}", sim.traffic);
    println!("  duration       = {}s", sim.duration);
    println!("  frame_rate     = {} fps", sim.frame_rate);
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    ConfigFile::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
