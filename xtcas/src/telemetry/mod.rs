//! Telemetry accessor collaborator.
//!
//! The host exposes its state as named data references ("datarefs"). A
//! name is resolved to a [`DatarefId`] once, then read every frame. Both
//! steps may report "unavailable" and the traffic interface treats that
//! as a skipped update, never as a failure.
//!
//! # Components
//!
//! - [`Telemetry`] - the accessor trait implemented by the host binding
//! - [`Datarefs`] - resolved handle set for every quantity the interface reads
//! - [`MemoryTelemetry`] - in-memory host stand-in for simulation and tests

mod datarefs;
mod memory;

pub use datarefs::{names, Datarefs, SlotDatarefs};
pub use memory::MemoryTelemetry;

/// Opaque handle to a resolved dataref.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatarefId(pub u32);

/// Synchronous access to host telemetry.
pub trait Telemetry: Send + Sync {
    /// Resolve a dataref name to a handle.
    ///
    /// Returns `None` if the host does not publish `name`.
    fn find(&self, name: &str) -> Option<DatarefId>;

    /// Read a floating point value.
    fn read_f64(&self, id: DatarefId) -> Option<f64>;

    /// Read an integer value.
    fn read_i32(&self, id: DatarefId) -> Option<i32> {
        self.read_f64(id).map(|v| v as i32)
    }
}
