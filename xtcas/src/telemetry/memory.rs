//! In-memory telemetry host.
//!
//! Plays the role of the simulator for the CLI simulation and for tests:
//! values are written by a "host" thread and read through [`Telemetry`].

use std::collections::HashMap;

use parking_lot::RwLock;

use super::datarefs::names;
use super::{DatarefId, Telemetry};
use crate::geo::LocalVector;
use crate::traffic::MAX_TRAFFIC_SLOTS;

#[derive(Debug, Default)]
struct Table {
    ids: HashMap<String, DatarefId>,
    values: Vec<Option<f64>>,
    offline: bool,
}

impl Table {
    fn id_for(&mut self, name: &str) -> DatarefId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = DatarefId(self.values.len() as u32);
        self.values.push(None);
        self.ids.insert(name.to_string(), id);
        id
    }
}

/// Thread-safe name → value table implementing [`Telemetry`].
///
/// A name is published once it has been registered or set. A published
/// name with no value (see [`MemoryTelemetry::unset`]) reads as unavailable.
#[derive(Debug, Default)]
pub struct MemoryTelemetry {
    table: RwLock<Table>,
}

impl MemoryTelemetry {
    /// Create an empty host that publishes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host publishing every dataref the traffic interface reads,
    /// all set to zero (every traffic slot vacant).
    pub fn with_default_datarefs() -> Self {
        let host = Self::new();
        for name in [
            names::TIME,
            names::BARO_ALT,
            names::RAD_ALT,
            names::LAT,
            names::LON,
            names::PLANE_X,
            names::PLANE_Y,
            names::PLANE_Z,
            names::VIEW_IS_EXTERNAL,
            names::WARNING_VOLUME,
        ] {
            host.set(name, 0.0);
        }
        for slot in 1..=MAX_TRAFFIC_SLOTS {
            host.set_slot(slot, LocalVector::ZERO);
        }
        host
    }

    /// Publish `name` with `value`.
    pub fn set(&self, name: &str, value: f64) {
        let mut table = self.table.write();
        let id = table.id_for(name);
        table.values[id.0 as usize] = Some(value);
    }

    /// Keep `name` published but make its value unavailable.
    pub fn unset(&self, name: &str) {
        let mut table = self.table.write();
        let id = table.id_for(name);
        table.values[id.0 as usize] = None;
    }

    /// Write the local coordinates of a 1-based multiplayer slot.
    pub fn set_slot(&self, slot: usize, local: LocalVector) {
        let mut table = self.table.write();
        for (axis, value) in [('x', local.x), ('y', local.y), ('z', local.z)] {
            let id = table.id_for(&names::slot_axis(slot, axis));
            table.values[id.0 as usize] = Some(value);
        }
    }

    /// Take the whole host offline: every read reports unavailable.
    pub fn set_offline(&self, offline: bool) {
        self.table.write().offline = offline;
    }

    /// Current value of `name`, bypassing handle resolution.
    pub fn get(&self, name: &str) -> Option<f64> {
        let table = self.table.read();
        let id = table.ids.get(name)?;
        table.values[id.0 as usize]
    }
}

impl Telemetry for MemoryTelemetry {
    fn find(&self, name: &str) -> Option<DatarefId> {
        self.table.read().ids.get(name).copied()
    }

    fn read_f64(&self, id: DatarefId) -> Option<f64> {
        let table = self.table.read();
        if table.offline {
            return None;
        }
        table.values.get(id.0 as usize).copied().flatten()
    }
}
