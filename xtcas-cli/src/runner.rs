//! CLI runner for common setup.
//!
//! Loads the configuration and initializes logging so command handlers
//! don't repeat it.

use std::path::Path;

use tracing::info;
use xtcas::config::ConfigFile;
use xtcas::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps logging active while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config (defaults if absent) and start logging to its log file.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file, default path when `None`
    /// * `debug_mode` - Enable DEBUG logging regardless of RUST_LOG
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config = load_config(config_path)?;

        let logging_guard = init_logging(&config.logging.file, true, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("xtcas v{}", xtcas::VERSION);
        info!(log_file = %self.config.logging.file.display(), "xtcas CLI: {} command", command);
    }
}

/// Load the config file from `path`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}
