//! Configuration file for the traffic interface and its simulation driver.
//!
//! Settings live in `~/.xtcas/config.ini`. Missing files and missing keys
//! fall back to the defaults in [`defaults`].
//!
//! # Example
//!
//! ```
//! use xtcas::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.sampler_config().interval, 0.1);
//! ```

pub mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, FlightLoopSettings, LoggingSettings, SamplerSettings, SimulationSettings,
};
