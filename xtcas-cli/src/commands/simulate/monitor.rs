//! Stand-in decision logic for simulation runs.
//!
//! Reports the closest intruder each tick and counts ticks where traffic is
//! inside the proximity volume. It does not issue advisories.

use xtcas::traffic::{DecisionLogic, EntityId, SimInterface};

/// Horizontal range of the proximity volume in nautical miles.
pub const PROXIMITY_RANGE_NM: f64 = 2.0;

/// Vertical half-height of the proximity volume, same unit as elevation.
pub const PROXIMITY_VERTICAL: f64 = 250.0;

/// Closest intruder seen on the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub entity_id: EntityId,
    pub range_nm: f64,
    pub relative_alt: f64,
}

impl Contact {
    pub fn is_proximate(&self) -> bool {
        self.range_nm <= PROXIMITY_RANGE_NM && self.relative_alt.abs() <= PROXIMITY_VERTICAL
    }
}

/// Decision logic that watches for proximate traffic.
#[derive(Debug, Default)]
pub struct ProximityMonitor {
    pub ticks: usize,
    pub proximate_ticks: usize,
    pub max_tracked: usize,
    pub closest: Option<Contact>,
}

impl DecisionLogic for ProximityMonitor {
    fn run(&mut self, sim: &dyn SimInterface) {
        let own = sim.own_position().position;
        let traffic = sim.other_positions();

        self.ticks += 1;
        self.max_tracked = self.max_tracked.max(traffic.len());
        self.closest = traffic
            .iter()
            .map(|t| Contact {
                entity_id: t.entity_id,
                range_nm: own.distance_nm(&t.position),
                relative_alt: t.position.elev - own.elev,
            })
            .min_by(|a, b| a.range_nm.total_cmp(&b.range_nm));

        if let Some(contact) = self.closest.filter(Contact::is_proximate) {
            self.proximate_ticks += 1;
            tracing::info!(
                time = format!("{:.1}", sim.current_time()),
                id = %contact.entity_id,
                range_nm = format!("{:.2}", contact.range_nm),
                rel_alt = format!("{:+.0}", contact.relative_alt),
                "Proximate traffic"
            );
        }
    }
}
