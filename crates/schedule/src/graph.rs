//! Finish-to-start dependency edges between schedule elements.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::element::ScheduleKey;

/// Scheduling error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Adding the edge would make the graph cyclic.
    #[error("dependency {from} -> {to} would create a cycle")]
    Cycle { from: ScheduleKey, to: ScheduleKey },

    /// An element in the affected subgraph has no placement in the book.
    #[error("element {0} has no placement")]
    MissingPlacement(ScheduleKey),
}

/// Directed acyclic graph of finish-to-start dependencies.
///
/// An edge `a -> b` means `b` may not start before `a` ends.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    successors: HashMap<ScheduleKey, Vec<ScheduleKey>>,
    predecessors: HashMap<ScheduleKey, Vec<ScheduleKey>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency edge. Duplicate edges are ignored; an edge closing
    /// a cycle is rejected.
    pub fn add_dependency(
        &mut self,
        from: ScheduleKey,
        to: ScheduleKey,
    ) -> Result<(), ScheduleError> {
        if from == to || self.reaches(to, from) {
            return Err(ScheduleError::Cycle { from, to });
        }
        let succs = self.successors.entry(from).or_default();
        if succs.contains(&to) {
            return Ok(());
        }
        succs.push(to);
        self.predecessors.entry(to).or_default().push(from);
        Ok(())
    }

    pub fn successors_of(&self, key: ScheduleKey) -> &[ScheduleKey] {
        self.successors.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors_of(&self, key: ScheduleKey) -> &[ScheduleKey] {
        self.predecessors
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every element reachable from `key` through successor edges.
    pub fn downstream_of(&self, key: ScheduleKey) -> HashSet<ScheduleKey> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<ScheduleKey> = self.successors_of(key).iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            if seen.insert(next) {
                queue.extend(self.successors_of(next).iter().copied());
            }
        }
        seen
    }

    fn reaches(&self, from: ScheduleKey, target: ScheduleKey) -> bool {
        from == target || self.downstream_of(from).contains(&target)
    }
}
