//! Per-frame position sampler.
//!
//! The host calls [`Sampler::on_frame`] once per rendering frame. Actual
//! sampling is throttled to one pass per [`SamplerConfig::interval`] of
//! simulator time; every other call returns immediately.
//!
//! # Sampling pass
//!
//! 1. Read own-ship latitude, longitude, indicated altitude and radar altitude
//! 2. For every multiplayer slot, read its local coordinates
//!    - all-zero → the slot is vacant, its entry is removed
//!    - otherwise → converted to geodetic and upserted
//! 3. Apply the whole pass to the [`TrafficContext`] in one critical section
//!
//! Telemetry reads and conversions happen before the lock is taken.

use std::sync::Arc;

use super::context::TrafficContext;
use super::registry::EntityId;
use crate::coord::CoordinateTransform;
use crate::geo::GeoPos3;
use crate::telemetry::Telemetry;

/// Default minimum spacing between samples, in simulator seconds.
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.1;

/// Sampler configuration.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Minimum simulator time between two effective samples.
    pub interval: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

/// What one sampling pass observed for a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotObservation {
    /// The slot holds an aircraft at `position`.
    Occupied {
        entity_id: EntityId,
        position: GeoPos3,
    },
    /// The slot reported the zero sentinel.
    Vacant { entity_id: EntityId },
}

/// Result of a call to [`Sampler::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// A sample was taken.
    Sampled {
        /// Aircraft tracked after the pass.
        tracked: usize,
        /// Slots left untouched because telemetry or the transform was unavailable.
        skipped_slots: usize,
    },
    /// Called again before the sample interval elapsed.
    Throttled,
    /// Time or own-ship telemetry unavailable, frame skipped.
    Unavailable,
}

/// Samples own-ship and traffic positions into a [`TrafficContext`].
pub struct Sampler {
    context: Arc<TrafficContext>,
    telemetry: Arc<dyn Telemetry>,
    transform: Arc<dyn CoordinateTransform>,
    config: SamplerConfig,
    last_sample: Option<f64>,
}

impl Sampler {
    pub fn new(
        context: Arc<TrafficContext>,
        telemetry: Arc<dyn Telemetry>,
        transform: Arc<dyn CoordinateTransform>,
        config: SamplerConfig,
    ) -> Self {
        Self {
            context,
            telemetry,
            transform,
            config,
            last_sample: None,
        }
    }

    /// Simulator time of the last effective sample.
    pub fn last_sample(&self) -> Option<f64> {
        self.last_sample
    }

    fn is_throttled(&self, now: f64) -> bool {
        // Also true when time went backwards.
        self.last_sample
            .is_some_and(|last| now - last < self.config.interval)
    }

    /// Per-frame entry point.
    ///
    /// # Panics
    ///
    /// If the context is not active.
    pub fn on_frame(&mut self) -> SampleOutcome {
        let datarefs = self.context.datarefs();
        let telemetry = self.telemetry.as_ref();

        let Some(now) = datarefs.read_time(telemetry) else {
            tracing::trace!("Simulator time unavailable, skipping frame");
            return SampleOutcome::Unavailable;
        };

        if self.is_throttled(now) {
            return SampleOutcome::Throttled;
        }

        let Some(ownship) = datarefs.read_ownship(telemetry) else {
            tracing::debug!(time = now, "Own-ship telemetry unavailable, skipping frame");
            return SampleOutcome::Unavailable;
        };

        let mut observations = Vec::with_capacity(datarefs.slots.len());
        let mut skipped_slots = 0;
        for (index, slot) in datarefs.slots.iter().enumerate() {
            let entity_id = EntityId::for_slot(index);
            let Some(local) = slot.read(telemetry) else {
                skipped_slots += 1;
                continue;
            };

            if local.is_zero() {
                observations.push(SlotObservation::Vacant { entity_id });
                continue;
            }

            match self.transform.local_to_world(local) {
                Some(position) => observations.push(SlotObservation::Occupied {
                    entity_id,
                    position,
                }),
                None => {
                    tracing::trace!(%entity_id, "Coordinate transform unavailable");
                    skipped_slots += 1;
                }
            }
        }

        self.last_sample = Some(now);
        let tracked = self.context.apply_sample(now, ownship, &observations);
        tracing::trace!(time = now, tracked, skipped_slots, "Traffic sampled");

        SampleOutcome::Sampled {
            tracked,
            skipped_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LocalTangentPlane;
    use crate::geo::LocalVector;
    use crate::telemetry::{names, MemoryTelemetry};
    use crate::traffic::OwnshipState;

    struct Fixture {
        host: Arc<MemoryTelemetry>,
        context: Arc<TrafficContext>,
        sampler: Sampler,
    }

    fn fixture_with(transform: Arc<dyn CoordinateTransform>) -> Fixture {
        let host = Arc::new(MemoryTelemetry::with_default_datarefs());
        let context = Arc::new(TrafficContext::new());
        context.init(&*host);
        let sampler = Sampler::new(
            context.clone(),
            host.clone(),
            transform,
            SamplerConfig::default(),
        );
        Fixture {
            host,
            context,
            sampler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(LocalTangentPlane::new(GeoPos3::new(
            50.0, 8.0, 0.0,
        ))))
    }

    #[test]
    fn test_first_frame_samples() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.host.set(names::LAT, 50.0);

        assert_eq!(
            f.sampler.on_frame(),
            SampleOutcome::Sampled {
                tracked: 0,
                skipped_slots: 0
            }
        );
        assert_eq!(f.sampler.last_sample(), Some(1.0));
        assert_eq!(f.context.ownship().position.lat, 50.0);
    }

    #[test]
    fn test_throttled_frame_changes_nothing() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.sampler.on_frame();

        f.host.set(names::TIME, 1.05);
        f.host.set(names::LAT, 51.0);
        f.host.set_slot(1, LocalVector::new(10.0, 10.0, 10.0));

        assert_eq!(f.sampler.on_frame(), SampleOutcome::Throttled);
        assert_eq!(f.sampler.last_sample(), Some(1.0));
        assert_eq!(f.context.ownship(), OwnshipState::default());
        assert_eq!(f.context.count(), 0);
    }

    #[test]
    fn test_samples_again_after_interval() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.sampler.on_frame();

        f.host.set(names::TIME, 1.1);
        f.host.set_slot(1, LocalVector::new(10.0, 10.0, 10.0));

        assert_eq!(
            f.sampler.on_frame(),
            SampleOutcome::Sampled {
                tracked: 1,
                skipped_slots: 0
            }
        );
    }

    #[test]
    fn test_time_moving_backwards_is_throttled() {
        let mut f = fixture();
        f.host.set(names::TIME, 100.0);
        f.sampler.on_frame();

        f.host.set(names::TIME, 99.0);
        f.host.set(names::LAT, 51.0);
        f.host.set_slot(1, LocalVector::new(10.0, 10.0, 10.0));

        assert_eq!(f.sampler.on_frame(), SampleOutcome::Throttled);
        assert_eq!(f.sampler.last_sample(), Some(100.0));
        assert_eq!(f.context.count(), 0);
        assert_eq!(f.context.sim_time(), 100.0);
    }

    #[test]
    fn test_throttled_frame_leaves_time_alone() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.sampler.on_frame();
        assert_eq!(f.context.sim_time(), 1.0);

        f.host.set(names::TIME, 1.04);
        assert_eq!(f.sampler.on_frame(), SampleOutcome::Throttled);
        assert_eq!(f.context.sim_time(), 1.0);
    }

    #[test]
    fn test_unavailable_ownship_leaves_time_alone() {
        let mut f = fixture();
        f.host.set(names::TIME, 4.0);
        f.host.unset(names::LAT);

        assert_eq!(f.sampler.on_frame(), SampleOutcome::Unavailable);
        assert_eq!(f.context.sim_time(), 0.0);
    }

    #[test]
    fn test_vacated_slot_removed() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.host.set_slot(7, LocalVector::new(500.0, 300.0, -500.0));
        f.sampler.on_frame();
        assert_eq!(f.context.snapshot()[0].entity_id.get(), 7);

        f.host.set(names::TIME, 2.0);
        f.host.set_slot(7, LocalVector::ZERO);
        f.sampler.on_frame();
        assert!(f.context.snapshot().is_empty());
    }

    #[test]
    fn test_time_unavailable_skips_frame() {
        let mut f = fixture();
        f.host.unset(names::TIME);
        f.host.set_slot(1, LocalVector::new(1.0, 1.0, 1.0));

        assert_eq!(f.sampler.on_frame(), SampleOutcome::Unavailable);
        assert_eq!(f.context.count(), 0);
        assert_eq!(f.sampler.last_sample(), None);
    }

    #[test]
    fn test_ownship_unavailable_skips_frame() {
        let mut f = fixture();
        f.host.set(names::TIME, 3.0);
        f.host.unset(names::RAD_ALT);
        f.host.set_slot(1, LocalVector::new(1.0, 1.0, 1.0));

        assert_eq!(f.sampler.on_frame(), SampleOutcome::Unavailable);
        assert_eq!(f.context.count(), 0);
        assert_eq!(f.sampler.last_sample(), None);
    }

    #[test]
    fn test_offline_host_skips_frame() {
        let mut f = fixture();
        f.host.set_offline(true);
        assert_eq!(f.sampler.on_frame(), SampleOutcome::Unavailable);
    }

    #[test]
    fn test_unavailable_slot_left_untouched() {
        let mut f = fixture();
        f.host.set(names::TIME, 1.0);
        f.host.set_slot(2, LocalVector::new(100.0, 0.0, 0.0));
        f.sampler.on_frame();
        let before = f.context.snapshot();

        f.host.set(names::TIME, 2.0);
        f.host.unset(&names::slot_axis(2, 'y'));

        assert_eq!(
            f.sampler.on_frame(),
            SampleOutcome::Sampled {
                tracked: 1,
                skipped_slots: 1
            }
        );
        assert_eq!(f.context.snapshot(), before);
    }

    #[test]
    fn test_transform_unavailable_skips_slot() {
        let transform = |local: LocalVector| {
            (local.x > 0.0).then(|| GeoPos3::new(local.x, local.y, local.z))
        };
        let mut f = fixture_with(Arc::new(transform));
        f.host.set(names::TIME, 1.0);
        f.host.set_slot(1, LocalVector::new(1.0, 2.0, 3.0));
        f.host.set_slot(2, LocalVector::new(-1.0, 2.0, 3.0));

        assert_eq!(
            f.sampler.on_frame(),
            SampleOutcome::Sampled {
                tracked: 1,
                skipped_slots: 1
            }
        );
        assert_eq!(
            f.context.snapshot()[0].position,
            GeoPos3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    #[should_panic(expected = "used while uninitialized")]
    fn test_frame_after_fini_panics() {
        let mut f = fixture();
        f.context.fini();
        f.sampler.on_frame();
    }
}
