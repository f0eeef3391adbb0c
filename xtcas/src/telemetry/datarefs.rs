//! Dataref names and the resolved handle set.

use super::{DatarefId, Telemetry};
use crate::geo::{GeoPos3, LocalVector};
use crate::traffic::{OwnshipState, MAX_TRAFFIC_SLOTS};

/// Host dataref names read by the traffic interface.
pub mod names {
    pub const TIME: &str = "sim/time/total_running_time_sec";
    pub const BARO_ALT: &str = "sim/flightmodel/misc/h_ind";
    pub const RAD_ALT: &str = "sim/cockpit2/gauges/indicators/radio_altimeter_height_ft_pilot";
    pub const LAT: &str = "sim/flightmodel/position/latitude";
    pub const LON: &str = "sim/flightmodel/position/longitude";
    pub const PLANE_X: &str = "sim/flightmodel/position/local_x";
    pub const PLANE_Y: &str = "sim/flightmodel/position/local_y";
    pub const PLANE_Z: &str = "sim/flightmodel/position/local_z";
    pub const VIEW_IS_EXTERNAL: &str = "sim/graphics/view/view_is_external";
    pub const WARNING_VOLUME: &str = "sim/operation/sound/warning_volume_ratio";

    /// Multiplayer slot coordinate name, `slot` is 1-based.
    pub fn slot_axis(slot: usize, axis: char) -> String {
        format!("sim/multiplayer/position/plane{slot}_{axis}")
    }
}

/// Resolved local coordinate handles for one multiplayer slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotDatarefs {
    pub x: Option<DatarefId>,
    pub y: Option<DatarefId>,
    pub z: Option<DatarefId>,
}

impl SlotDatarefs {
    fn resolve(telemetry: &dyn Telemetry, slot: usize) -> Self {
        Self {
            x: telemetry.find(&names::slot_axis(slot, 'x')),
            y: telemetry.find(&names::slot_axis(slot, 'y')),
            z: telemetry.find(&names::slot_axis(slot, 'z')),
        }
    }

    /// Read the slot's local coordinates, `None` if any axis is unavailable.
    pub fn read(&self, telemetry: &dyn Telemetry) -> Option<LocalVector> {
        Some(LocalVector::new(
            read(telemetry, self.x)?,
            read(telemetry, self.y)?,
            read(telemetry, self.z)?,
        ))
    }
}

/// Every dataref handle the traffic interface reads, resolved once at init.
///
/// Handles that failed to resolve are `None` and read as unavailable.
#[derive(Debug, Clone)]
pub struct Datarefs {
    pub time: Option<DatarefId>,
    pub baro_alt: Option<DatarefId>,
    pub rad_alt: Option<DatarefId>,
    pub lat: Option<DatarefId>,
    pub lon: Option<DatarefId>,
    pub plane_x: Option<DatarefId>,
    pub plane_y: Option<DatarefId>,
    pub plane_z: Option<DatarefId>,
    pub view_is_external: Option<DatarefId>,
    pub warning_volume: Option<DatarefId>,
    pub slots: [SlotDatarefs; MAX_TRAFFIC_SLOTS],
}

impl Datarefs {
    /// Resolve all names against the host.
    pub fn resolve(telemetry: &dyn Telemetry) -> Self {
        let refs = Self {
            time: telemetry.find(names::TIME),
            baro_alt: telemetry.find(names::BARO_ALT),
            rad_alt: telemetry.find(names::RAD_ALT),
            lat: telemetry.find(names::LAT),
            lon: telemetry.find(names::LON),
            plane_x: telemetry.find(names::PLANE_X),
            plane_y: telemetry.find(names::PLANE_Y),
            plane_z: telemetry.find(names::PLANE_Z),
            view_is_external: telemetry.find(names::VIEW_IS_EXTERNAL),
            warning_volume: telemetry.find(names::WARNING_VOLUME),
            slots: std::array::from_fn(|i| SlotDatarefs::resolve(telemetry, i + 1)),
        };

        let missing = refs.missing_count();
        if missing > 0 {
            tracing::warn!(missing, "Some datarefs could not be resolved");
        } else {
            tracing::debug!("All datarefs resolved");
        }
        refs
    }

    fn missing_count(&self) -> usize {
        let scalars = [
            self.time,
            self.baro_alt,
            self.rad_alt,
            self.lat,
            self.lon,
            self.plane_x,
            self.plane_y,
            self.plane_z,
            self.view_is_external,
            self.warning_volume,
        ];
        let slot_axes = self.slots.iter().flat_map(|s| [s.x, s.y, s.z]);
        scalars
            .into_iter()
            .chain(slot_axes)
            .filter(Option::is_none)
            .count()
    }

    /// Read the current simulator time in seconds.
    pub fn read_time(&self, telemetry: &dyn Telemetry) -> Option<f64> {
        read(telemetry, self.time)
    }

    /// Read own-ship position and height above ground.
    pub fn read_ownship(&self, telemetry: &dyn Telemetry) -> Option<OwnshipState> {
        let position = GeoPos3::new(
            read(telemetry, self.lat)?,
            read(telemetry, self.lon)?,
            read(telemetry, self.baro_alt)?,
        );
        let agl = read(telemetry, self.rad_alt)?;
        Some(OwnshipState { position, agl })
    }

    /// Returns true if the user is looking from an external view.
    ///
    /// Unavailable reads as "not external".
    pub fn read_view_is_external(&self, telemetry: &dyn Telemetry) -> bool {
        self.view_is_external
            .and_then(|id| telemetry.read_i32(id))
            .is_some_and(|v| v == 1)
    }

    /// Read the host's warning volume ratio, unavailable reads as silent.
    pub fn read_warning_volume(&self, telemetry: &dyn Telemetry) -> f64 {
        read(telemetry, self.warning_volume).unwrap_or(0.0)
    }
}

fn read(telemetry: &dyn Telemetry, id: Option<DatarefId>) -> Option<f64> {
    id.and_then(|id| telemetry.read_f64(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemoryTelemetry;

    #[test]
    fn test_slot_names_are_one_based() {
        assert_eq!(
            names::slot_axis(1, 'x'),
            "sim/multiplayer/position/plane1_x"
        );
        assert_eq!(
            names::slot_axis(19, 'z'),
            "sim/multiplayer/position/plane19_z"
        );
    }

    #[test]
    fn test_resolve_against_full_host() {
        let host = MemoryTelemetry::with_default_datarefs();
        let refs = Datarefs::resolve(&host);

        assert_eq!(refs.missing_count(), 0);
        assert!(refs.slots.iter().all(|s| s.x.is_some() && s.z.is_some()));
    }

    #[test]
    fn test_resolve_against_empty_host() {
        let host = MemoryTelemetry::new();
        let refs = Datarefs::resolve(&host);

        assert_eq!(refs.missing_count(), 10 + 3 * MAX_TRAFFIC_SLOTS);
        assert_eq!(refs.read_time(&host), None);
        assert!(refs.read_ownship(&host).is_none());
        assert!(refs.slots[0].read(&host).is_none());
    }

    #[test]
    fn test_read_ownship() {
        let host = MemoryTelemetry::with_default_datarefs();
        host.set(names::LAT, 10.0);
        host.set(names::LON, 20.0);
        host.set(names::BARO_ALT, 1000.0);
        host.set(names::RAD_ALT, 50.0);
        let refs = Datarefs::resolve(&host);

        let own = refs.read_ownship(&host).unwrap();
        assert_eq!(own.position, GeoPos3::new(10.0, 20.0, 1000.0));
        assert_eq!(own.agl, 50.0);
    }

    #[test]
    fn test_partial_slot_is_unavailable() {
        let host = MemoryTelemetry::new();
        host.set(&names::slot_axis(2, 'x'), 1.0);
        host.set(&names::slot_axis(2, 'y'), 2.0);
        let refs = Datarefs::resolve(&host);

        assert!(refs.slots[1].read(&host).is_none());
    }

    #[test]
    fn test_view_and_volume_defaults() {
        let host = MemoryTelemetry::new();
        let refs = Datarefs::resolve(&host);

        assert!(!refs.read_view_is_external(&host));
        assert_eq!(refs.read_warning_volume(&host), 0.0);
    }
}
