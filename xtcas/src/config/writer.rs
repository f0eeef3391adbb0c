//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let sim = &config.simulation;
    format!(
        r#"[sampler]
; Minimum simulator seconds between two traffic samples.
; The sampler is called every rendering frame but only reads positions this often.
interval = {}

[flight_loop]
; Seconds between TCAS logic ticks.
interval = {}

[logging]
; Log file path (truncated at the start of every session)
file = {}

[simulation]
; Settings for `xtcas simulate`.
; Own-ship position, also the origin of the local coordinate frame
reference_lat = {}
reference_lon = {}
reference_elev = {}
; Number of scripted intruders (0-19)
traffic = {}
; Session length in seconds
duration = {}
; Rendering frames per second driving the sampler
frame_rate = {}
"#,
        config.sampler.interval,
        config.flight_loop.interval,
        config.logging.file.display(),
        sim.reference_lat,
        sim.reference_lon,
        sim.reference_elev,
        sim.traffic,
        sim.duration,
        sim.frame_rate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_every_section() {
        let content = to_config_string(&ConfigFile::default());
        for section in ["[sampler]", "[flight_loop]", "[logging]", "[simulation]"] {
            assert!(content.contains(section), "missing {section}");
        }
        assert!(content.contains("interval = 0.1"));
        assert!(content.contains("traffic = 6"));
    }
}
