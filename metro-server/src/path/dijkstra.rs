//! Dijkstra shortest-path search.
//!
//! All section distances are positive integers, so the classic binary-heap
//! Dijkstra applies directly. Parallel sections compete independently; the
//! search simply relaxes every outgoing edge.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::domain::{SectionId, StationId};
use crate::graph::{GraphStore, Topology};

use super::PathError;

/// A minimum-distance walk between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Stations in traversal order, source first and target last.
    pub stations: Vec<StationId>,

    /// Sections taken between consecutive stations.
    /// Always one shorter than `stations`.
    pub sections: Vec<SectionId>,

    /// Sum of the distances of `sections`.
    pub distance: u64,
}

/// Shortest-path search over one topology snapshot.
pub struct PathFinder<'a> {
    topology: &'a Topology,
}

impl<'a> PathFinder<'a> {
    /// Create a finder over the given snapshot.
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// Find a minimum-distance walk from `source` to `target`.
    ///
    /// Fails with [`PathError::SameStation`] if the two are equal, with
    /// [`PathError::StationNotFound`] naming the first id that is not a
    /// vertex, and with [`PathError::NoPath`] if `target` is unreachable.
    pub fn find(&self, source: StationId, target: StationId) -> Result<PathResult, PathError> {
        if source == target {
            return Err(PathError::SameStation(source));
        }
        for station in [source, target] {
            if !self.topology.contains_station(station) {
                return Err(PathError::StationNotFound(station));
            }
        }

        let mut best: HashMap<StationId, u64> = HashMap::new();
        let mut previous: HashMap<StationId, (StationId, SectionId)> = HashMap::new();
        let mut heap = BinaryHeap::new();

        best.insert(source, 0);
        heap.push(Reverse((0u64, source)));

        while let Some(Reverse((distance, station))) = heap.pop() {
            if station == target {
                let result = self.reconstruct(source, target, distance, &previous);
                debug!(
                    %source,
                    %target,
                    distance,
                    hops = result.sections.len(),
                    "shortest path found"
                );
                return Ok(result);
            }

            // Stale heap entry
            if best.get(&station).is_some_and(|&b| distance > b) {
                continue;
            }

            for edge in self.topology.outgoing(station) {
                let candidate = distance.saturating_add(edge.weight);
                if best.get(&edge.to).is_none_or(|&b| candidate < b) {
                    best.insert(edge.to, candidate);
                    previous.insert(edge.to, (station, edge.section));
                    heap.push(Reverse((candidate, edge.to)));
                }
            }
        }

        debug!(%source, %target, explored = best.len(), "no path");
        Err(PathError::NoPath {
            from: source,
            to: target,
        })
    }

    /// Walk the predecessor chain back from the target.
    fn reconstruct(
        &self,
        source: StationId,
        target: StationId,
        distance: u64,
        previous: &HashMap<StationId, (StationId, SectionId)>,
    ) -> PathResult {
        let mut stations = vec![target];
        let mut sections = Vec::new();
        let mut current = target;

        while current != source {
            let Some(&(prev, section)) = previous.get(&current) else {
                debug_assert!(false, "broken predecessor chain at {current}");
                break;
            };
            stations.push(prev);
            sections.push(section);
            current = prev;
        }

        stations.reverse();
        sections.reverse();

        PathResult {
            stations,
            sections,
            distance,
        }
    }
}

/// Find the shortest path on the store's current state.
///
/// Takes a snapshot first, so the search runs without holding the lock and
/// reflects the topology at the moment of the call.
pub fn find_shortest_path(
    store: &GraphStore,
    source: StationId,
    target: StationId,
) -> Result<PathResult, PathError> {
    let snapshot = store.snapshot();
    PathFinder::new(&snapshot).find(source, target)
}
