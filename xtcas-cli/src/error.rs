//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use xtcas::config::ConfigFileError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to read or write the config file
    ConfigFile(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// A simulation task failed
    Simulation(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) = self {
            eprintln!();
            eprintln!("Fix the value in your config file or regenerate it with:");
            eprintln!("  xtcas config init --force");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::Simulation(msg) => write!(f, "Simulation failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_value() {
        let err = CliError::from(ConfigFileError::InvalidValue {
            section: "sampler".to_string(),
            key: "interval".to_string(),
            value: "0".to_string(),
            reason: "must be a positive number of seconds".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: sampler.interval = '0' - must be a positive number of seconds"
        );
    }

    #[test]
    fn test_source_chain() {
        let err = CliError::Runtime(std::io::Error::other("no threads"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&CliError::Config("x".into())).is_none());
    }
}
