//! Default values for every configuration setting.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::traffic::{DEFAULT_FLIGHT_LOOP_INTERVAL, DEFAULT_SAMPLE_INTERVAL};

/// Default log file name, placed in the config directory.
pub const DEFAULT_LOG_FILE: &str = "xtcas.log";

/// Hamburg airport, the default simulation reference point.
pub const DEFAULT_REFERENCE_LAT: f64 = 53.630278;
pub const DEFAULT_REFERENCE_LON: f64 = 9.988333;
pub const DEFAULT_REFERENCE_ELEV: f64 = 3000.0;

pub const DEFAULT_SIM_TRAFFIC: usize = 6;
pub const DEFAULT_SIM_DURATION_SECS: u64 = 60;
pub const DEFAULT_SIM_FRAME_RATE: u32 = 30;

/// Highest frame rate accepted for simulation.
pub const MAX_SIM_FRAME_RATE: u32 = 240;

/// Default log file path (~/.xtcas/xtcas.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            sampler: SamplerSettings {
                interval: DEFAULT_SAMPLE_INTERVAL,
            },
            flight_loop: FlightLoopSettings {
                interval: DEFAULT_FLIGHT_LOOP_INTERVAL,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
            simulation: SimulationSettings {
                reference_lat: DEFAULT_REFERENCE_LAT,
                reference_lon: DEFAULT_REFERENCE_LON,
                reference_elev: DEFAULT_REFERENCE_ELEV,
                traffic: DEFAULT_SIM_TRAFFIC,
                duration: DEFAULT_SIM_DURATION_SECS,
                frame_rate: DEFAULT_SIM_FRAME_RATE,
            },
        }
    }
}
