//! xtcas - traffic interface between X-Plane and TCAS decision logic
//!
//! The simulator renders frames and runs logic ticks on independent
//! schedules. This library samples own-ship and multiplayer traffic
//! positions on the render side and hands consistent snapshots to the
//! collision avoidance logic on the logic side.
//!
//! # Modules
//!
//! - [`traffic`] - position registry, sampler, logic bridge and lifecycle
//! - [`telemetry`] - dataref access to the host simulator
//! - [`coord`] - local → geodetic coordinate transform
//! - [`geo`] - position primitives
//! - [`config`] - INI configuration
//! - [`logging`] - tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use xtcas::coord::LocalTangentPlane;
//! use xtcas::geo::{GeoPos3, LocalVector};
//! use xtcas::telemetry::{names, MemoryTelemetry};
//! use xtcas::traffic::{Sampler, SamplerConfig, SimInterface, TrafficContext};
//!
//! let host = Arc::new(MemoryTelemetry::with_default_datarefs());
//! let plane = LocalTangentPlane::new(GeoPos3::new(53.63, 9.99, 0.0));
//! let context = Arc::new(TrafficContext::new());
//! context.init(&*host);
//!
//! let mut sampler = Sampler::new(context.clone(), host.clone(), Arc::new(plane), SamplerConfig::default());
//! host.set(names::TIME, 1.0);
//! host.set_slot(3, LocalVector::new(1000.0, 150.0, -2000.0));
//! sampler.on_frame();
//!
//! let traffic = context.other_positions();
//! assert_eq!(traffic.len(), 1);
//! assert_eq!(traffic[0].entity_id.get(), 3);
//! context.fini();
//! ```

pub mod config;
pub mod coord;
pub mod geo;
pub mod logging;
pub mod telemetry;
pub mod traffic;

/// Version of the xtcas library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
