//! Shared, lock-guarded graph store.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Section, SectionId, StationId};

use super::{GraphError, Topology};

/// Thread-safe owner of the canonical topology.
///
/// Mutations take the write lock and are applied copy-on-write: a
/// [`snapshot`](GraphStore::snapshot) handed out earlier keeps seeing the
/// state it was taken from, and a query never observes a half-applied
/// mutation. Snapshots are cheap (`Arc` clone under the read lock), so path
/// queries run without holding any lock.
#[derive(Debug, Default)]
pub struct GraphStore {
    topology: RwLock<Arc<Topology>>,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station vertex. Returns `false` if it already existed.
    pub fn add_station(&self, station: StationId) -> bool {
        let mut guard = self.topology.write();
        if guard.contains_station(station) {
            return false;
        }
        Arc::make_mut(&mut *guard).insert_station(station);
        debug!(%station, "station added to graph");
        true
    }

    /// Remove a station vertex. Fails if any section still references it.
    pub fn remove_station(&self, station: StationId) -> Result<(), GraphError> {
        let mut guard = self.topology.write();
        if !guard.contains_station(station) {
            return Err(GraphError::UnknownStation(station));
        }
        let sections = guard.degree(station);
        if sections > 0 {
            return Err(GraphError::VertexInUse { station, sections });
        }
        Arc::make_mut(&mut *guard).remove_station(station)?;
        debug!(%station, "station removed from graph");
        Ok(())
    }

    /// Add a section edge.
    pub fn add_section(&self, section: Section) -> Result<(), GraphError> {
        self.add_sections(std::slice::from_ref(&section))
    }

    /// Add several section edges as one mutation.
    ///
    /// Every section is validated before any is inserted, so either all of
    /// them become visible to the next snapshot or none do.
    pub fn add_sections(&self, sections: &[Section]) -> Result<(), GraphError> {
        let mut guard = self.topology.write();
        let mut ids = HashSet::with_capacity(sections.len());
        for section in sections {
            guard.validate_section(section)?;
            if !ids.insert(section.id) {
                return Err(GraphError::DuplicateSection(section.id));
            }
        }
        if sections.is_empty() {
            return Ok(());
        }

        let topology = Arc::make_mut(&mut *guard);
        for section in sections {
            topology.insert_section(*section)?;
            debug!(
                section = %section.id,
                up = %section.up,
                down = %section.down,
                distance = section.distance,
                "section added to graph"
            );
        }
        Ok(())
    }

    /// Remove one section edge by id.
    pub fn remove_section(&self, id: SectionId) -> Result<Section, GraphError> {
        let mut removed = self.remove_sections(&[id])?;
        removed.pop().ok_or(GraphError::UnknownSection(id))
    }

    /// Remove several section edges as one mutation.
    ///
    /// Fails without removing anything if any id is unknown or repeated.
    pub fn remove_sections(&self, ids: &[SectionId]) -> Result<Vec<Section>, GraphError> {
        let mut guard = self.topology.write();
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if guard.section(id).is_none() || !seen.insert(id) {
                return Err(GraphError::UnknownSection(id));
            }
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let topology = Arc::make_mut(&mut *guard);
        let mut removed = Vec::with_capacity(ids.len());
        for &id in ids {
            removed.push(topology.remove_section(id)?);
            debug!(section = %id, "section removed from graph");
        }
        Ok(removed)
    }

    /// Replace the whole topology with one built from a full data set.
    ///
    /// On failure the current topology is kept.
    pub fn rebuild(
        &self,
        stations: impl IntoIterator<Item = StationId>,
        sections: impl IntoIterator<Item = Section>,
    ) -> Result<(), GraphError> {
        let topology = Topology::from_parts(stations, sections)?;
        let (stations, sections) = (topology.station_count(), topology.section_count());
        *self.topology.write() = Arc::new(topology);
        debug!(stations, sections, "graph rebuilt");
        Ok(())
    }

    /// Take an immutable view of the current topology.
    pub fn snapshot(&self) -> Arc<Topology> {
        Arc::clone(&*self.topology.read())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::LineId;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        AddStation(u64),
        RemoveStation(u64),
        AddSection(u64, u64, u64, i64),
        RemoveSection(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u64..6).prop_map(Op::AddStation),
            (0u64..6).prop_map(Op::RemoveStation),
            (0u64..20, 0u64..6, 0u64..6, -2i64..20)
                .prop_map(|(id, up, down, d)| Op::AddSection(id, up, down, d)),
            (0u64..20).prop_map(Op::RemoveSection),
        ]
    }

    proptest! {
        /// Whatever sequence of mutations is applied, every edge has both
        /// endpoints, a positive weight, and no self-loop.
        #[test]
        fn invariants_hold_under_random_mutation(ops in prop::collection::vec(op(), 0..60)) {
            let store = GraphStore::new();
            for op in ops {
                let before = store.snapshot();
                let result = match op {
                    Op::AddStation(s) => {
                        store.add_station(StationId::new(s));
                        Ok(())
                    }
                    Op::RemoveStation(s) => store.remove_station(StationId::new(s)),
                    Op::AddSection(id, up, down, d) => store.add_section(Section::new(
                        SectionId::new(id),
                        LineId::new(1),
                        StationId::new(up),
                        StationId::new(down),
                        d,
                    )),
                    Op::RemoveSection(id) => store.remove_section(SectionId::new(id)).map(|_| ()),
                };
                let after = store.snapshot();
                if result.is_err() {
                    prop_assert!(Arc::ptr_eq(&before, &after));
                }
                for section in after.sections() {
                    prop_assert!(after.contains_station(section.up));
                    prop_assert!(after.contains_station(section.down));
                    prop_assert!(section.distance > 0);
                    prop_assert_ne!(section.up, section.down);
                }
                let edges: usize = after.stations().map(|s| after.outgoing(s).len()).sum();
                prop_assert_eq!(edges, after.section_count());
            }
        }
    }
}
