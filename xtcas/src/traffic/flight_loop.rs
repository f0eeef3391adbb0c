//! Logic tick driving the decision logic.
//!
//! The host calls [`FlightLoop::tick`] on its own schedule, independent of
//! rendering. Each tick records the simulator time, runs the
//! [`DecisionLogic`] against the shared [`TrafficContext`] and works out
//! how loud alerts should be played.

use std::sync::Arc;

use super::bridge::DecisionLogic;
use super::context::TrafficContext;
use crate::telemetry::Telemetry;

/// Default host scheduling interval for logic ticks, in seconds.
pub const DEFAULT_FLIGHT_LOOP_INTERVAL: f64 = 0.1;

/// Flight loop configuration.
#[derive(Debug, Clone)]
pub struct FlightLoopConfig {
    /// Interval at which the host should call [`FlightLoop::tick`].
    pub interval: f64,
}

impl Default for FlightLoopConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FLIGHT_LOOP_INTERVAL,
        }
    }
}

/// Result of one logic tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Simulator time as seen by the decision logic.
    pub time: f64,
    /// Alert volume in `0.0..=1.0`, silent in external views.
    pub alert_volume: f64,
    /// Seconds until the host should call again.
    pub next_call: f64,
}

/// Logic-tick entry point.
pub struct FlightLoop {
    context: Arc<TrafficContext>,
    telemetry: Arc<dyn Telemetry>,
    config: FlightLoopConfig,
}

impl FlightLoop {
    pub fn new(
        context: Arc<TrafficContext>,
        telemetry: Arc<dyn Telemetry>,
        config: FlightLoopConfig,
    ) -> Self {
        Self {
            context,
            telemetry,
            config,
        }
    }

    pub fn interval(&self) -> f64 {
        self.config.interval
    }

    /// Run one logic tick.
    ///
    /// # Panics
    ///
    /// If the context is not active.
    pub fn tick(&self, logic: &mut dyn DecisionLogic) -> TickOutcome {
        let datarefs = self.context.datarefs();
        let telemetry = self.telemetry.as_ref();

        match datarefs.read_time(telemetry) {
            Some(time) => self.context.observe_time(time),
            None => tracing::trace!("Simulator time unavailable on logic tick"),
        }

        let alert_volume = if datarefs.read_view_is_external(telemetry) {
            0.0
        } else {
            datarefs.read_warning_volume(telemetry).clamp(0.0, 1.0)
        };

        logic.run(&*self.context);

        TickOutcome {
            time: self.context.sim_time(),
            alert_volume,
            next_call: self.config.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPos3;
    use crate::telemetry::{names, MemoryTelemetry};
    use crate::traffic::{EntityId, SimInterface};

    #[derive(Default)]
    struct RecordingLogic {
        runs: usize,
        seen_time: f64,
        seen_traffic: usize,
    }

    impl DecisionLogic for RecordingLogic {
        fn run(&mut self, sim: &dyn SimInterface) {
            self.runs += 1;
            self.seen_time = sim.current_time();
            self.seen_traffic = sim.other_positions().len();
        }
    }

    fn setup() -> (Arc<MemoryTelemetry>, Arc<TrafficContext>, FlightLoop) {
        let host = Arc::new(MemoryTelemetry::with_default_datarefs());
        let context = Arc::new(TrafficContext::new());
        context.init(&*host);
        let flight_loop = FlightLoop::new(context.clone(), host.clone(), FlightLoopConfig::default());
        (host, context, flight_loop)
    }

    #[test]
    fn test_tick_runs_logic_with_current_time() {
        let (host, context, flight_loop) = setup();
        host.set(names::TIME, 7.5);
        context.upsert(EntityId::for_slot(4), GeoPos3::new(1.0, 1.0, 1.0));

        let mut logic = RecordingLogic::default();
        let outcome = flight_loop.tick(&mut logic);

        assert_eq!(logic.runs, 1);
        assert_eq!(logic.seen_time, 7.5);
        assert_eq!(logic.seen_traffic, 1);
        assert_eq!(outcome.time, 7.5);
        assert_eq!(outcome.next_call, DEFAULT_FLIGHT_LOOP_INTERVAL);
    }

    #[test]
    fn test_volume_follows_warning_ratio() {
        let (host, _context, flight_loop) = setup();
        host.set(names::WARNING_VOLUME, 0.6);

        let outcome = flight_loop.tick(&mut RecordingLogic::default());
        assert_eq!(outcome.alert_volume, 0.6);
    }

    #[test]
    fn test_volume_silent_in_external_view() {
        let (host, _context, flight_loop) = setup();
        host.set(names::WARNING_VOLUME, 0.6);
        host.set(names::VIEW_IS_EXTERNAL, 1.0);

        let outcome = flight_loop.tick(&mut RecordingLogic::default());
        assert_eq!(outcome.alert_volume, 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let (host, _context, flight_loop) = setup();
        host.set(names::WARNING_VOLUME, 1.7);

        let outcome = flight_loop.tick(&mut RecordingLogic::default());
        assert_eq!(outcome.alert_volume, 1.0);
    }

    #[test]
    fn test_time_unavailable_keeps_last_time() {
        let (host, _context, flight_loop) = setup();
        host.set(names::TIME, 4.0);
        flight_loop.tick(&mut RecordingLogic::default());

        host.unset(names::TIME);
        let mut logic = RecordingLogic::default();
        let outcome = flight_loop.tick(&mut logic);

        assert_eq!(logic.runs, 1);
        assert_eq!(outcome.time, 4.0);
    }
}
