//! `entitykit-schedule`: temporal placement and dependency-aware
//! rescheduling for schedule elements.
//!
//! Elements are identified by an opaque [`ScheduleKey`], so any entity kind
//! (or a mix of companion kinds) can participate in one dependency graph.
//! [`reschedule::reschedule_after`] recomputes only the elements downstream
//! of a moved one; unrelated elements are never touched.

pub mod element;
pub mod graph;
pub mod reschedule;

pub use element::{Schedule, ScheduleBook, ScheduleKey, SlotTable, TimeSlot};
pub use graph::{DependencyGraph, ScheduleError};
pub use reschedule::reschedule_after;
