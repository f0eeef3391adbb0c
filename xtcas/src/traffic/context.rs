//! Shared traffic context and its lifecycle.
//!
//! [`TrafficContext`] is the one piece of state shared between the render
//! thread (sampler) and the logic thread (decision logic). Everything it
//! owns sits behind a single mutex:
//!
//! - the [`PositionRegistry`]
//! - the [`OwnshipState`]
//! - the last observed simulator time
//! - the resolved [`Datarefs`]
//!
//! # Lifecycle
//!
//! `Uninitialized → Active → Uninitialized`. [`TrafficContext::init`] builds
//! an empty registry and resolves the datarefs, [`TrafficContext::fini`]
//! drains the registry and drops the handles. Any other operation while
//! uninitialized is a sequencing bug in the caller and panics.

use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use super::ownship::OwnshipState;
use super::registry::{EntityId, PositionRegistry, TrackedPosition};
use super::sampler::SlotObservation;
use crate::geo::GeoPos3;
use crate::telemetry::{Datarefs, Telemetry};

/// State that only exists while the context is active.
struct ActiveState {
    registry: PositionRegistry,
    ownship: OwnshipState,
    sim_time: f64,
    datarefs: Arc<Datarefs>,
}

/// Mutex-guarded traffic registry plus own-ship state.
///
/// Shared between threads as `Arc<TrafficContext>`.
pub struct TrafficContext {
    state: Mutex<Option<ActiveState>>,
}

impl Default for TrafficContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficContext {
    /// Create an uninitialized context.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Transition to `Active`: empty registry, cleared own-ship state and
    /// freshly resolved datarefs.
    ///
    /// # Panics
    ///
    /// If the context is already active.
    pub fn init(&self, telemetry: &dyn Telemetry) {
        // Resolve before taking the lock, the host may be slow to answer.
        let datarefs = Arc::new(Datarefs::resolve(telemetry));

        let mut state = self.state.lock();
        assert!(state.is_none(), "traffic context initialized twice");
        *state = Some(ActiveState {
            registry: PositionRegistry::new(),
            ownship: OwnshipState::default(),
            sim_time: 0.0,
            datarefs,
        });
        drop(state);

        tracing::info!("Traffic context active");
    }

    /// Transition back to `Uninitialized`, releasing every tracked entry.
    ///
    /// # Panics
    ///
    /// If the context is not active.
    pub fn fini(&self) {
        let taken = self.state.lock().take();
        let Some(mut active) = taken else {
            panic!("traffic context finalized while uninitialized");
        };

        let released = active.registry.clear();
        tracing::info!(released, "Traffic context shut down");
    }

    /// Returns true between `init` and `fini`.
    pub fn is_active(&self) -> bool {
        self.state.lock().is_some()
    }

    fn active(&self) -> MappedMutexGuard<'_, ActiveState> {
        MutexGuard::map(self.state.lock(), |state| match state {
            Some(active) => active,
            None => panic!("traffic context used while uninitialized"),
        })
    }

    /// Resolved dataref handles for this session.
    pub fn datarefs(&self) -> Arc<Datarefs> {
        Arc::clone(&self.active().datarefs)
    }

    /// Insert or overwrite the position of `entity_id`.
    pub fn upsert(&self, entity_id: EntityId, position: GeoPos3) {
        self.active().registry.upsert(entity_id, position);
    }

    /// Stop tracking `entity_id`. No-op if it is not tracked.
    pub fn remove(&self, entity_id: EntityId) {
        self.active().registry.remove(entity_id);
    }

    /// Consistent copy of every tracked position, ordered by id.
    pub fn snapshot(&self) -> Vec<TrackedPosition> {
        self.active().registry.snapshot()
    }

    /// Number of tracked aircraft.
    pub fn count(&self) -> usize {
        self.active().registry.count()
    }

    /// Latest own-ship state.
    pub fn ownship(&self) -> OwnshipState {
        self.active().ownship
    }

    /// Overwrite own-ship state.
    pub fn set_ownship(&self, ownship: OwnshipState) {
        self.active().ownship = ownship;
    }

    /// Record a simulator time reading.
    ///
    /// The stored time never moves backwards.
    pub fn observe_time(&self, time: f64) {
        let mut active = self.active();
        if time > active.sim_time {
            active.sim_time = time;
        }
    }

    /// Last observed simulator time.
    pub fn sim_time(&self) -> f64 {
        self.active().sim_time
    }

    /// Time, own-ship and traffic read under one lock.
    ///
    /// Returns `None` instead of panicking when the context is not active,
    /// for observers that may outlive the session.
    pub fn try_snapshot_all(&self) -> Option<(f64, OwnshipState, Vec<TrackedPosition>)> {
        let state = self.state.lock();
        let active = state.as_ref()?;
        Some((active.sim_time, active.ownship, active.registry.snapshot()))
    }

    /// Apply one sampler pass taken at `time` in a single critical section.
    ///
    /// Returns the number of tracked aircraft afterwards.
    pub fn apply_sample(
        &self,
        time: f64,
        ownship: OwnshipState,
        observations: &[SlotObservation],
    ) -> usize {
        let mut active = self.active();
        if time > active.sim_time {
            active.sim_time = time;
        }
        active.ownship = ownship;
        for observation in observations {
            match *observation {
                SlotObservation::Occupied { entity_id, position } => {
                    active.registry.upsert(entity_id, position);
                }
                SlotObservation::Vacant { entity_id } => {
                    if active.registry.remove(entity_id).is_some() {
                        tracing::debug!(%entity_id, "Traffic left range");
                    }
                }
            }
        }
        active.registry.count()
    }
}
