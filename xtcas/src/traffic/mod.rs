//! Traffic position interface.
//!
//! Tracks own-ship state and up to [`MAX_TRAFFIC_SLOTS`] multiplayer aircraft
//! and hands consistent snapshots to the TCAS decision logic.
//!
//! # Architecture
//!
//! Two host schedules drive the interface, possibly on different threads:
//!
//! - **Render frames** → [`Sampler::on_frame`] reads telemetry at most once per
//!   sample interval, converts slot coordinates and writes them into the
//!   registry under the context lock
//! - **Logic ticks** → [`FlightLoop::tick`] runs the [`DecisionLogic`], which
//!   queries the [`SimInterface`] implemented by [`TrafficContext`]
//!
//! Telemetry reads and coordinate transforms always happen outside the
//! lock. The critical section only copies already computed values.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use xtcas::coord::LocalTangentPlane;
//! use xtcas::geo::GeoPos3;
//! use xtcas::telemetry::MemoryTelemetry;
//! use xtcas::traffic::{Sampler, SamplerConfig, SimInterface, TrafficContext};
//!
//! let host = Arc::new(MemoryTelemetry::with_default_datarefs());
//! let transform = Arc::new(LocalTangentPlane::new(GeoPos3::default()));
//!
//! let context = Arc::new(TrafficContext::new());
//! context.init(&*host);
//!
//! let mut sampler = Sampler::new(context.clone(), host, transform, SamplerConfig::default());
//! sampler.on_frame();
//!
//! assert!(context.other_positions().is_empty());
//! context.fini();
//! ```

mod bridge;
mod context;
mod flight_loop;
mod logger;
mod ownship;
mod registry;
mod sampler;

pub use bridge::{DecisionLogic, SimInterface};
pub use context::TrafficContext;
pub use flight_loop::{FlightLoop, FlightLoopConfig, TickOutcome, DEFAULT_FLIGHT_LOOP_INTERVAL};
pub use logger::{spawn_traffic_logger, DEFAULT_LOG_INTERVAL};
pub use ownship::OwnshipState;
pub use registry::{EntityId, PositionRegistry, TrackedPosition};
pub use sampler::{
    SampleOutcome, Sampler, SamplerConfig, SlotObservation, DEFAULT_SAMPLE_INTERVAL,
};

/// Number of multiplayer slots the host exposes besides own-ship.
pub const MAX_TRAFFIC_SLOTS: usize = 19;
