//! Incremental rescheduling of the downstream subgraph.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::element::{ScheduleBook, ScheduleKey, TimeSlot};
use crate::graph::{DependencyGraph, ScheduleError};

/// Recompute the placements of every element downstream of `moved`.
///
/// Incremental: only the transitive successors of `moved` are visited, in
/// topological order (Kahn over the affected subgraph). Each one is pushed
/// to start no earlier than the latest end among all its predecessors;
/// durations are kept; elements never move earlier than their current
/// start. New placements are computed for the whole subgraph first and
/// applied to the book afterwards, so a failure mid-computation leaves no
/// partially-rescheduled state observable.
///
/// Returns the rescheduled keys in the order they were recomputed.
pub fn reschedule_after(
    graph: &DependencyGraph,
    book: &mut dyn ScheduleBook,
    moved: ScheduleKey,
) -> Result<Vec<ScheduleKey>, ScheduleError> {
    let affected = graph.downstream_of(moved);
    if affected.is_empty() {
        return Ok(Vec::new());
    }

    // In-degrees counted among affected nodes only: predecessors outside
    // the subgraph (including `moved` itself) are fixed inputs.
    let mut indegree: HashMap<ScheduleKey, usize> = HashMap::with_capacity(affected.len());
    for &key in &affected {
        let degree = graph
            .predecessors_of(key)
            .iter()
            .filter(|p| affected.contains(p))
            .count();
        indegree.insert(key, degree);
    }

    let mut ready: VecDeque<ScheduleKey> = indegree
        .iter()
        .filter(|&(_, &d)| d == 0)
        .map(|(&k, _)| k)
        .collect();

    let mut planned: HashMap<ScheduleKey, TimeSlot> = HashMap::with_capacity(affected.len());
    let mut order = Vec::with_capacity(affected.len());

    while let Some(key) = ready.pop_front() {
        let mut earliest: Option<DateTime<Utc>> = None;
        for &pred in graph.predecessors_of(key) {
            let end = match planned.get(&pred) {
                Some(slot) => slot.end,
                None => book
                    .placement_of(pred)
                    .ok_or(ScheduleError::MissingPlacement(pred))?
                    .end,
            };
            earliest = Some(earliest.map_or(end, |e| e.max(end)));
        }

        let current = book
            .placement_of(key)
            .ok_or(ScheduleError::MissingPlacement(key))?;
        let new_start = earliest.unwrap_or(current.start).max(current.start);
        planned.insert(key, current.moved_to(new_start));
        order.push(key);

        for &succ in graph.successors_of(key) {
            if let Some(degree) = indegree.get_mut(&succ) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(succ);
                }
            }
        }
    }

    // Apply phase: nothing was written until every placement computed.
    for &key in &order {
        book.apply_placement(key, planned[&key]);
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::SlotTable;

    use proptest::prelude::*;

    fn t(minutes: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(minutes * 60, 0).unwrap()
    }

    fn slot(start: i64, end: i64) -> TimeSlot {
        TimeSlot::new(t(start), t(end))
    }

    #[test]
    fn chain_is_pushed_and_order_preserved() {
        let (a, b, c) = (ScheduleKey::new(), ScheduleKey::new(), ScheduleKey::new());
        let mut graph = DependencyGraph::new();
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(b, c).unwrap();

        let mut book = SlotTable::new();
        // `a` was moved to end at minute 60; dependents still sit earlier.
        book.insert(a, slot(30, 60));
        book.insert(b, slot(10, 20));
        book.insert(c, slot(25, 40));

        let order = reschedule_after(&graph, &mut book, a).unwrap();
        assert_eq!(order, vec![b, c]);

        let b_slot = book.get(b).unwrap();
        let c_slot = book.get(c).unwrap();
        assert_eq!(b_slot, slot(60, 70));
        assert_eq!(c_slot, slot(70, 85));
        assert!(b_slot.end <= c_slot.start);
    }

    #[test]
    fn unrelated_elements_are_untouched() {
        let (a, b, lone) = (ScheduleKey::new(), ScheduleKey::new(), ScheduleKey::new());
        let mut graph = DependencyGraph::new();
        graph.add_dependency(a, b).unwrap();

        let mut book = SlotTable::new();
        book.insert(a, slot(0, 50));
        book.insert(b, slot(10, 20));
        book.insert(lone, slot(5, 15));

        reschedule_after(&graph, &mut book, a).unwrap();
        assert_eq!(book.get(lone).unwrap(), slot(5, 15));
    }

    #[test]
    fn diamond_waits_for_the_later_branch() {
        let (a, b, c, d) = (
            ScheduleKey::new(),
            ScheduleKey::new(),
            ScheduleKey::new(),
            ScheduleKey::new(),
        );
        let mut graph = DependencyGraph::new();
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(a, c).unwrap();
        graph.add_dependency(b, d).unwrap();
        graph.add_dependency(c, d).unwrap();

        let mut book = SlotTable::new();
        book.insert(a, slot(0, 100));
        book.insert(b, slot(0, 10)); // pushed to 100..110
        book.insert(c, slot(0, 30)); // pushed to 100..130
        book.insert(d, slot(0, 5));

        reschedule_after(&graph, &mut book, a).unwrap();
        // `d` starts after the later of its two predecessors.
        assert_eq!(book.get(d).unwrap(), slot(130, 135));
    }

    #[test]
    fn element_without_dependents_reschedules_nothing() {
        let a = ScheduleKey::new();
        let graph = DependencyGraph::new();
        let mut book = SlotTable::new();
        book.insert(a, slot(0, 10));

        let order = reschedule_after(&graph, &mut book, a).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn missing_placement_fails_before_anything_is_applied() {
        let (a, b, c) = (ScheduleKey::new(), ScheduleKey::new(), ScheduleKey::new());
        let mut graph = DependencyGraph::new();
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(b, c).unwrap();

        let mut book = SlotTable::new();
        book.insert(a, slot(0, 50));
        book.insert(b, slot(0, 10));
        // `c` has no placement.

        let err = reschedule_after(&graph, &mut book, a).unwrap_err();
        assert_eq!(err, ScheduleError::MissingPlacement(c));
        // `b` was not partially rescheduled.
        assert_eq!(book.get(b).unwrap(), slot(0, 10));
    }

    proptest! {
        /// A pushed chain always keeps its dependency order, whatever the
        /// durations and however far the head moves.
        #[test]
        fn chain_order_is_preserved(
            durations in proptest::collection::vec(1i64..120, 2..12),
            head_end in 0i64..500,
        ) {
            let mut graph = DependencyGraph::new();
            let mut book = SlotTable::new();

            let head = ScheduleKey::new();
            book.insert(head, slot(head_end - 10, head_end));

            let mut keys = Vec::new();
            let mut prev = head;
            let mut cursor = 0;
            for &d in &durations {
                let key = ScheduleKey::new();
                graph.add_dependency(prev, key).unwrap();
                book.insert(key, slot(cursor, cursor + d));
                cursor += d;
                keys.push(key);
                prev = key;
            }

            reschedule_after(&graph, &mut book, head).unwrap();

            let mut last_end = book.get(head).unwrap().end;
            for (&key, &d) in keys.iter().zip(&durations) {
                let s = book.get(key).unwrap();
                prop_assert!(s.start >= last_end);
                prop_assert_eq!(s.duration(), chrono::TimeDelta::minutes(d));
                last_end = s.end;
            }
        }
    }
}
