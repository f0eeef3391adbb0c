//! Sorted registry of tracked traffic positions.
//!
//! [`PositionRegistry`] is the plain container. It has no locking of its
//! own; [`super::TrafficContext`] owns it behind the interface mutex.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use crate::geo::GeoPos3;

/// Stable identifier of a tracked aircraft.
///
/// For multiplayer traffic this is the 1-based slot number, so it is never
/// zero and never moves to a different slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Create an id from a raw value, `None` for zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Id of the multiplayer slot at 0-based `index`.
    pub fn for_slot(index: usize) -> Self {
        let id = u32::try_from(index + 1).ok().and_then(NonZeroU32::new);
        match id {
            Some(id) => Self(id),
            None => panic!("slot index {index} out of range"),
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tracked aircraft as handed to consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPosition {
    pub entity_id: EntityId,
    pub position: GeoPos3,
}

/// Tracked positions keyed and ordered by [`EntityId`].
#[derive(Debug, Clone, Default)]
pub struct PositionRegistry {
    entries: BTreeMap<EntityId, GeoPos3>,
}

impl PositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry or overwrite the position of an existing one.
    pub fn upsert(&mut self, entity_id: EntityId, position: GeoPos3) {
        self.entries.insert(entity_id, position);
    }

    /// Remove an entry. Returns the last known position, `None` if absent.
    pub fn remove(&mut self, entity_id: EntityId) -> Option<GeoPos3> {
        self.entries.remove(&entity_id)
    }

    pub fn get(&self, entity_id: EntityId) -> Option<GeoPos3> {
        self.entries.get(&entity_id).copied()
    }

    /// Copy of every entry in ascending id order.
    pub fn snapshot(&self) -> Vec<TrackedPosition> {
        self.entries
            .iter()
            .map(|(&entity_id, &position)| TrackedPosition {
                entity_id,
                position,
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, returning how many were released.
    pub fn clear(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }
}
