//! Query interface consumed by the TCAS decision logic.
//!
//! - [`SimInterface`] - the three read-only queries the logic may issue
//! - [`DecisionLogic`] - the logic itself, driven by [`super::FlightLoop`]

use std::sync::Arc;

use super::context::TrafficContext;
use super::ownship::OwnshipState;
use super::registry::TrackedPosition;

/// Read-only view of the simulator handed to the decision logic.
///
/// Every query assumes the interface is active. Calling one before init or
/// after shutdown panics.
pub trait SimInterface: Send + Sync {
    /// Simulator time last observed by a frame or logic tick, in seconds.
    ///
    /// Never decreases within a session.
    fn current_time(&self) -> f64;

    /// Latest own-ship position and height above ground.
    fn own_position(&self) -> OwnshipState;

    /// Snapshot of every tracked intruder, ordered by entity id.
    ///
    /// The returned vector is a fresh copy owned by the caller.
    fn other_positions(&self) -> Vec<TrackedPosition>;
}

/// Collision avoidance logic run once per logic tick.
pub trait DecisionLogic: Send {
    fn run(&mut self, sim: &dyn SimInterface);
}

impl SimInterface for TrafficContext {
    fn current_time(&self) -> f64 {
        self.sim_time()
    }

    fn own_position(&self) -> OwnshipState {
        self.ownship()
    }

    fn other_positions(&self) -> Vec<TrackedPosition> {
        self.snapshot()
    }
}

impl<T: SimInterface + ?Sized> SimInterface for Arc<T> {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn own_position(&self) -> OwnshipState {
        (**self).own_position()
    }

    fn other_positions(&self) -> Vec<TrackedPosition> {
        (**self).other_positions()
    }
}
