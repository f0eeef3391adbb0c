//! Scripted traffic played into the in-memory host.
//!
//! Own-ship flies due north at constant speed. Each intruder circles it at
//! its own radius and altitude offset and periodically drops out of range,
//! which the host reports as an all-zero slot.

use std::f64::consts::TAU;

use xtcas::coord::{CoordinateTransform, LocalTangentPlane};
use xtcas::geo::{GeoPos3, LocalVector};
use xtcas::telemetry::{names, MemoryTelemetry};
use xtcas::traffic::MAX_TRAFFIC_SLOTS;

/// Own-ship ground speed in meters per second (~250 kt).
const OWNSHIP_SPEED_MPS: f64 = 128.0;

/// Intruder speed along its circle in meters per second.
const INTRUDER_SPEED_MPS: f64 = 110.0;

/// Closest and widest circle radius in meters.
const MIN_RADIUS_M: f64 = 1_500.0;
const RADIUS_STEP_M: f64 = 1_200.0;

/// One scripted intruder.
#[derive(Debug, Clone)]
struct Intruder {
    radius: f64,
    phase: f64,
    /// Signed angular rate, rad/s.
    rate: f64,
    altitude_offset: f64,
    /// Seconds per in-range/out-of-range cycle.
    cycle: f64,
}

impl Intruder {
    fn new(index: usize, count: usize) -> Self {
        let radius = MIN_RADIUS_M + RADIUS_STEP_M * index as f64;
        let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
        Self {
            radius,
            phase: TAU * index as f64 / count.max(1) as f64,
            rate: direction * INTRUDER_SPEED_MPS / radius,
            altitude_offset: ((index % 5) as f64 - 2.0) * 150.0,
            cycle: 40.0 + 7.0 * index as f64,
        }
    }

    /// Out of range for the last fifth of every cycle.
    fn in_range(&self, time: f64) -> bool {
        (time % self.cycle) < self.cycle * 0.8
    }

    /// Position relative to own-ship in the local frame.
    fn offset(&self, time: f64) -> LocalVector {
        let angle = self.phase + self.rate * time;
        let east = self.radius * angle.cos();
        let north = self.radius * angle.sin();
        LocalVector::new(east, self.altitude_offset, -north)
    }
}

/// Scripted session writing host telemetry for a given simulator time.
pub struct Scenario {
    plane: LocalTangentPlane,
    intruders: Vec<Intruder>,
}

impl Scenario {
    /// Create a scenario with `traffic` intruders around `reference`.
    pub fn new(reference: GeoPos3, traffic: usize) -> Self {
        let traffic = traffic.min(MAX_TRAFFIC_SLOTS);
        Self {
            plane: LocalTangentPlane::new(reference),
            intruders: (0..traffic).map(|i| Intruder::new(i, traffic)).collect(),
        }
    }

    /// The local frame used by the scripted host.
    pub fn plane(&self) -> LocalTangentPlane {
        self.plane
    }

    /// Own-ship position in the local frame at `time`.
    fn ownship_local(&self, time: f64) -> LocalVector {
        LocalVector::new(0.0, 0.0, -OWNSHIP_SPEED_MPS * time)
    }

    /// Write every dataref for `time` into `host`.
    ///
    /// Returns how many intruders are in range.
    pub fn write(&self, host: &MemoryTelemetry, time: f64) -> usize {
        let own_local = self.ownship_local(time);
        host.set(names::TIME, time);
        host.set(names::PLANE_X, own_local.x);
        host.set(names::PLANE_Y, own_local.y);
        host.set(names::PLANE_Z, own_local.z);

        if let Some(own) = self.plane.local_to_world(own_local) {
            host.set(names::LAT, own.lat);
            host.set(names::LON, own.lon);
            host.set(names::BARO_ALT, own.elev);
            host.set(names::RAD_ALT, own.elev);
        }

        let mut in_range = 0;
        for slot in 1..=MAX_TRAFFIC_SLOTS {
            let local = match self.intruders.get(slot - 1) {
                Some(intruder) if intruder.in_range(time) => {
                    in_range += 1;
                    let offset = intruder.offset(time);
                    LocalVector::new(
                        own_local.x + offset.x,
                        own_local.y + offset.y,
                        own_local.z + offset.z,
                    )
                }
                _ => LocalVector::ZERO,
            };
            host.set_slot(slot, local);
        }
        in_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAMBURG: GeoPos3 = GeoPos3::new(53.630278, 9.988333, 3000.0);

    #[test]
    fn test_traffic_capped_at_slot_count() {
        let scenario = Scenario::new(HAMBURG, 40);
        assert_eq!(scenario.intruders.len(), MAX_TRAFFIC_SLOTS);
    }

    #[test]
    fn test_write_at_start() {
        let host = MemoryTelemetry::with_default_datarefs();
        let scenario = Scenario::new(HAMBURG, 3);

        assert_eq!(scenario.write(&host, 0.0), 3);
        assert_eq!(host.get(names::LAT), Some(HAMBURG.lat));
        assert_eq!(host.get(names::BARO_ALT), Some(HAMBURG.elev));
        assert_ne!(host.get(&names::slot_axis(1, 'x')), Some(0.0));
        // Unscripted slots stay vacant
        assert_eq!(host.get(&names::slot_axis(4, 'x')), Some(0.0));
        assert_eq!(host.get(&names::slot_axis(4, 'z')), Some(0.0));
    }

    #[test]
    fn test_intruder_leaves_range() {
        let host = MemoryTelemetry::with_default_datarefs();
        let scenario = Scenario::new(HAMBURG, 1);

        // First intruder cycles every 40s, out of range from 32s
        assert_eq!(scenario.write(&host, 35.0), 0);
        assert_eq!(host.get(&names::slot_axis(1, 'x')), Some(0.0));
        assert_eq!(scenario.write(&host, 41.0), 1);
    }

    #[test]
    fn test_ownship_moves_north() {
        let host = MemoryTelemetry::with_default_datarefs();
        let scenario = Scenario::new(HAMBURG, 0);

        scenario.write(&host, 60.0);
        let lat = host.get(names::LAT).unwrap();
        assert!(lat > HAMBURG.lat);
    }

    #[test]
    fn test_intruder_keeps_radius() {
        let intruder = Intruder::new(2, 4);
        for t in [0.0, 13.0, 77.5] {
            let offset = intruder.offset(t);
            let horizontal = offset.x.hypot(offset.z);
            assert!((horizontal - intruder.radius).abs() < 1e-6);
        }
    }
}
