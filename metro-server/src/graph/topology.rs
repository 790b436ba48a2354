//! Adjacency-map representation of the network.

use std::collections::HashMap;

use crate::domain::{Section, SectionId, StationId};

use super::GraphError;

/// One outgoing edge of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The section this edge was built from.
    pub section: SectionId,
    /// The down station.
    pub to: StationId,
    /// Section distance, always positive.
    pub weight: u64,
}

/// A directed weighted multigraph keyed by station id.
///
/// Every vertex has an entry in `outgoing` (possibly empty), and every edge
/// in `outgoing` has a matching entry in `sections`. Parallel edges between
/// the same pair of stations are kept side by side.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    outgoing: HashMap<StationId, Vec<Edge>>,
    /// Number of edges arriving at each vertex.
    incoming: HashMap<StationId, usize>,
    sections: HashMap<SectionId, Section>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from a full station and section set.
    ///
    /// Sections are validated exactly as [`Topology::insert_section`] does;
    /// the first invalid one aborts the build.
    pub fn from_parts(
        stations: impl IntoIterator<Item = StationId>,
        sections: impl IntoIterator<Item = Section>,
    ) -> Result<Self, GraphError> {
        let mut topology = Self::new();
        for station in stations {
            topology.insert_station(station);
        }
        for section in sections {
            topology.insert_section(section)?;
        }
        Ok(topology)
    }

    /// Whether the station is a vertex.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.outgoing.contains_key(&station)
    }

    /// Number of vertices.
    pub fn station_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of edges.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// All vertices, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.outgoing.keys().copied()
    }

    /// Look up the section behind an edge.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(&id)
    }

    /// All sections, in no particular order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.values()
    }

    /// Edges leaving a station. Empty for unknown stations.
    pub fn outgoing(&self, station: StationId) -> &[Edge] {
        self.outgoing
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of sections touching a station, in either direction.
    pub fn degree(&self, station: StationId) -> usize {
        self.outgoing(station).len() + self.incoming.get(&station).copied().unwrap_or(0)
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn insert_station(&mut self, station: StationId) -> bool {
        if self.outgoing.contains_key(&station) {
            return false;
        }
        self.outgoing.insert(station, Vec::new());
        true
    }

    /// Remove a vertex that no section references.
    pub fn remove_station(&mut self, station: StationId) -> Result<(), GraphError> {
        if !self.contains_station(station) {
            return Err(GraphError::UnknownStation(station));
        }
        let sections = self.degree(station);
        if sections > 0 {
            return Err(GraphError::VertexInUse { station, sections });
        }
        self.outgoing.remove(&station);
        self.incoming.remove(&station);
        Ok(())
    }

    /// Check a section against the current vertices without adding it.
    ///
    /// Returns the edge weight on success.
    pub fn validate_section(&self, section: &Section) -> Result<u64, GraphError> {
        for station in [section.up, section.down] {
            if !self.contains_station(station) {
                return Err(GraphError::UnknownStation(station));
            }
        }
        let weight = u64::try_from(section.distance)
            .ok()
            .filter(|&w| w > 0)
            .ok_or(GraphError::InvalidDistance {
                section: section.id,
                distance: section.distance,
            })?;
        if section.up == section.down {
            return Err(GraphError::SelfLoop {
                section: section.id,
                station: section.up,
            });
        }
        if self.sections.contains_key(&section.id) {
            return Err(GraphError::DuplicateSection(section.id));
        }
        Ok(weight)
    }

    /// Add an edge. Parallel edges are not deduplicated.
    pub fn insert_section(&mut self, section: Section) -> Result<(), GraphError> {
        let weight = self.validate_section(&section)?;
        self.outgoing.entry(section.up).or_default().push(Edge {
            section: section.id,
            to: section.down,
            weight,
        });
        *self.incoming.entry(section.down).or_default() += 1;
        self.sections.insert(section.id, section);
        Ok(())
    }

    /// Remove one edge instance. Its endpoints stay.
    pub fn remove_section(&mut self, id: SectionId) -> Result<Section, GraphError> {
        let section = self
            .sections
            .remove(&id)
            .ok_or(GraphError::UnknownSection(id))?;

        if let Some(edges) = self.outgoing.get_mut(&section.up) {
            edges.retain(|e| e.section != id);
        }
        if let Some(count) = self.incoming.get_mut(&section.down) {
            *count -= 1;
            if *count == 0 {
                self.incoming.remove(&section.down);
            }
        }
        debug_assert!(self.contains_station(section.up) && self.contains_station(section.down));
        Ok(section)
    }
}
