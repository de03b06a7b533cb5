//! Schedule elements: keys, time slots and the placement book.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::{DependencyGraph, ScheduleError};

/// Opaque key of one schedule element.
///
/// Deliberately untyped with respect to entity kinds: a graph may mix
/// elements of one kind with its companion kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleKey(Uuid);

impl ScheduleKey {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ScheduleKey {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Temporal placement of one element: a half-open interval `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "slot must not end before it starts");
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Same duration, new start.
    pub fn moved_to(&self, start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + self.duration(),
        }
    }
}

/// Capability: the entity is a schedule element.
///
/// The entity only carries its key; placements live in a [`ScheduleBook`],
/// which is the single source of truth the rescheduler reads and writes.
/// No other capability is required; scheduling is orthogonal to
/// persistence and identity.
pub trait Schedule {
    fn schedule_key(&self) -> ScheduleKey;

    /// Recompute the placements of every element depending on this one,
    /// directly or transitively, preserving dependency ordering. Elements
    /// outside this element's downstream subgraph are not touched.
    fn reschedule_after(
        &self,
        graph: &DependencyGraph,
        book: &mut dyn ScheduleBook,
    ) -> Result<Vec<ScheduleKey>, ScheduleError> {
        crate::reschedule::reschedule_after(graph, book, self.schedule_key())
    }
}

/// Placement store the rescheduler reads from and writes to.
///
/// The storage/planning collaborator implements this over its own state;
/// [`SlotTable`] is the in-memory reference implementation.
pub trait ScheduleBook {
    fn placement_of(&self, key: ScheduleKey) -> Option<TimeSlot>;

    fn apply_placement(&mut self, key: ScheduleKey, slot: TimeSlot);
}

/// In-memory placement table.
#[derive(Debug, Default, Clone)]
pub struct SlotTable {
    slots: HashMap<ScheduleKey, TimeSlot>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ScheduleKey, slot: TimeSlot) {
        self.slots.insert(key, slot);
    }

    pub fn get(&self, key: ScheduleKey) -> Option<TimeSlot> {
        self.slots.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ScheduleBook for SlotTable {
    fn placement_of(&self, key: ScheduleKey) -> Option<TimeSlot> {
        self.get(key)
    }

    fn apply_placement(&mut self, key: ScheduleKey, slot: TimeSlot) {
        self.insert(key, slot);
    }
}
