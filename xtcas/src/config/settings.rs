//! Settings structs, one per `[section]` of the INI file.

use std::path::PathBuf;

use crate::geo::GeoPos3;
use crate::traffic::{FlightLoopConfig, SamplerConfig};

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Position sampler settings
    pub sampler: SamplerSettings,
    /// Logic tick settings
    pub flight_loop: FlightLoopSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Synthetic session settings for `xtcas simulate`
    pub simulation: SimulationSettings,
}

/// `[sampler]`
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerSettings {
    /// Minimum simulator seconds between samples
    pub interval: f64,
}

/// `[flight_loop]`
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLoopSettings {
    /// Seconds between logic ticks
    pub interval: f64,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

/// `[simulation]`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Own-ship starting latitude, also the local frame origin
    pub reference_lat: f64,
    /// Own-ship starting longitude
    pub reference_lon: f64,
    /// Own-ship altitude
    pub reference_elev: f64,
    /// Number of scripted intruders
    pub traffic: usize,
    /// Session length in seconds
    pub duration: u64,
    /// Render frames per second
    pub frame_rate: u32,
}

impl SimulationSettings {
    pub fn reference(&self) -> GeoPos3 {
        GeoPos3::new(self.reference_lat, self.reference_lon, self.reference_elev)
    }
}

impl ConfigFile {
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            interval: self.sampler.interval,
        }
    }

    pub fn flight_loop_config(&self) -> FlightLoopConfig {
        FlightLoopConfig {
            interval: self.flight_loop.interval,
        }
    }
}
