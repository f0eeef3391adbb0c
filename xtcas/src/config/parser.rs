//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::MAX_SIM_FRAME_RATE;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::traffic::MAX_TRAFFIC_SLOTS;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [sampler] section
    if let Some(section) = ini.section(Some("sampler")) {
        if let Some(v) = parse_interval(section, "sampler")? {
            config.sampler.interval = v;
        }
    }

    // [flight_loop] section
    if let Some(section) = ini.section(Some("flight_loop")) {
        if let Some(v) = parse_interval(section, "flight_loop")? {
            config.flight_loop.interval = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    // [simulation] section
    if let Some(section) = ini.section(Some("simulation")) {
        let sim = &mut config.simulation;
        if let Some(v) = parse_value::<f64>(section, "simulation", "reference_lat", "a number")? {
            if !(-90.0..=90.0).contains(&v) {
                return Err(invalid("simulation", "reference_lat", v, "must be between -90 and 90"));
            }
            sim.reference_lat = v;
        }
        if let Some(v) = parse_value::<f64>(section, "simulation", "reference_lon", "a number")? {
            if !(-180.0..=180.0).contains(&v) {
                return Err(invalid("simulation", "reference_lon", v, "must be between -180 and 180"));
            }
            sim.reference_lon = v;
        }
        if let Some(v) = parse_value::<f64>(section, "simulation", "reference_elev", "a number")? {
            sim.reference_elev = v;
        }
        if let Some(v) = parse_value::<usize>(section, "simulation", "traffic", "an integer")? {
            if v > MAX_TRAFFIC_SLOTS {
                return Err(invalid(
                    "simulation",
                    "traffic",
                    v,
                    &format!("at most {} intruders are supported", MAX_TRAFFIC_SLOTS),
                ));
            }
            sim.traffic = v;
        }
        if let Some(v) =
            parse_value::<u64>(section, "simulation", "duration", "a positive integer (seconds)")?
        {
            if v == 0 {
                return Err(invalid("simulation", "duration", v, "must be at least 1 second"));
            }
            sim.duration = v;
        }
        if let Some(v) = parse_value::<u32>(section, "simulation", "frame_rate", "an integer")? {
            if v == 0 || v > MAX_SIM_FRAME_RATE {
                return Err(invalid(
                    "simulation",
                    "frame_rate",
                    v,
                    &format!("must be between 1 and {}", MAX_SIM_FRAME_RATE),
                ));
            }
            sim.frame_rate = v;
        }
    }

    Ok(config)
}

/// Parse the `interval` key of a timing section.
fn parse_interval(section: &Properties, name: &str) -> Result<Option<f64>, ConfigFileError> {
    let Some(v) = parse_value::<f64>(section, name, "interval", "a number of seconds")? else {
        return Ok(None);
    };
    if !v.is_finite() || v <= 0.0 {
        return Err(invalid(name, "interval", v, "must be a positive number of seconds"));
    }
    Ok(Some(v))
}

fn parse_value<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    expected: &str,
) -> Result<Option<T>, ConfigFileError> {
    let Some(raw) = section.get(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| invalid(section_name, key, raw, &format!("must be {}", expected)))
}

fn invalid(section: &str, key: &str, value: impl ToString, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
