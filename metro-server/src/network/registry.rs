//! The network registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::domain::{Line, LineId, Section, SectionId, Station, StationId};
use crate::graph::{GraphError, GraphStore, Topology};
use crate::path::{PathResult, find_shortest_path};

use super::{NetworkError, NetworkSeed};

/// Request to add a section to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSection {
    pub up: StationId,
    pub down: StationId,
    pub distance: i64,
    /// Also register the reverse direction as its own section.
    pub bidirectional: bool,
}

/// A line together with its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDetail {
    #[serde(flatten)]
    pub line: Line,
    pub sections: Vec<Section>,
}

/// A shortest path with station names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub stations: Vec<Station>,
    pub path: PathResult,
}

/// Records kept beside the graph.
#[derive(Debug)]
struct Records {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    sections: BTreeMap<SectionId, Section>,
    next_station: u64,
    next_line: u64,
    next_section: u64,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            stations: BTreeMap::new(),
            lines: BTreeMap::new(),
            sections: BTreeMap::new(),
            next_station: 1,
            next_line: 1,
            next_section: 1,
        }
    }
}

impl Records {
    fn station_named(&self, name: &str) -> bool {
        self.stations.values().any(|s| s.name() == name)
    }

    fn line_named(&self, name: &str) -> bool {
        self.lines.values().any(|l| l.name() == name)
    }
}

/// Registry of the metro network.
///
/// Writes are serialized by the registry lock, which is always taken before
/// the graph store's own lock. Path queries only take a graph snapshot.
#[derive(Debug, Default)]
pub struct Network {
    graph: GraphStore,
    records: RwLock<Records>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from a full seed, rebuilding the graph in one step.
    ///
    /// New identifiers continue after the largest seeded one.
    pub fn from_seed(seed: NetworkSeed) -> Result<Self, NetworkError> {
        let mut records = Records::default();

        for s in seed.stations {
            let station = Station::new(s.id, &s.name)?;
            if records.station_named(station.name()) {
                return Err(NetworkError::DuplicateName {
                    kind: "station",
                    name: station.name().to_string(),
                });
            }
            if records.stations.insert(s.id, station).is_some() {
                return Err(NetworkError::InvalidSeed(format!(
                    "station id {} appears twice",
                    s.id
                )));
            }
        }

        for l in seed.lines {
            let line = Line::new(l.id, &l.name)?;
            if records.line_named(line.name()) {
                return Err(NetworkError::DuplicateName {
                    kind: "line",
                    name: line.name().to_string(),
                });
            }
            if records.lines.insert(l.id, line).is_some() {
                return Err(NetworkError::InvalidSeed(format!(
                    "line id {} appears twice",
                    l.id
                )));
            }
        }

        for s in seed.sections {
            let section = Section::from(s);
            if !records.lines.contains_key(&section.line) {
                return Err(NetworkError::UnknownLine(section.line));
            }
            if records.sections.insert(section.id, section).is_some() {
                return Err(NetworkError::InvalidSeed(format!(
                    "section id {} appears twice",
                    section.id
                )));
            }
        }

        let graph = GraphStore::new();
        graph.rebuild(
            records.stations.keys().copied(),
            records.sections.values().copied(),
        )?;

        records.next_station = next_after(records.stations.keys().map(|id| id.get()));
        records.next_line = next_after(records.lines.keys().map(|id| id.get()));
        records.next_section = next_after(records.sections.keys().map(|id| id.get()));

        info!(
            stations = records.stations.len(),
            lines = records.lines.len(),
            sections = records.sections.len(),
            "network loaded from seed"
        );

        Ok(Self {
            graph,
            records: RwLock::new(records),
        })
    }

    /// An immutable view of the current graph.
    pub fn snapshot(&self) -> Arc<Topology> {
        self.graph.snapshot()
    }

    /// Register a new station.
    pub fn create_station(&self, name: &str) -> Result<Station, NetworkError> {
        let mut records = self.records.write();
        let station = Station::new(StationId::new(records.next_station), name)?;
        if records.station_named(station.name()) {
            return Err(NetworkError::DuplicateName {
                kind: "station",
                name: station.name().to_string(),
            });
        }

        self.graph.add_station(station.id());
        records.next_station += 1;
        records.stations.insert(station.id(), station.clone());

        info!(station = %station.id(), name = station.name(), "station created");
        Ok(station)
    }

    /// Look up a station.
    pub fn station(&self, id: StationId) -> Option<Station> {
        self.records.read().stations.get(&id).cloned()
    }

    /// All stations, ordered by id.
    pub fn stations(&self) -> Vec<Station> {
        self.records.read().stations.values().cloned().collect()
    }

    /// Delete a station that no section references.
    pub fn delete_station(&self, id: StationId) -> Result<Station, NetworkError> {
        let mut records = self.records.write();
        if !records.stations.contains_key(&id) {
            return Err(GraphError::UnknownStation(id).into());
        }

        self.graph.remove_station(id)?;
        let station = records
            .stations
            .remove(&id)
            .ok_or(GraphError::UnknownStation(id))?;

        info!(station = %id, "station deleted");
        Ok(station)
    }

    /// Register a new line.
    pub fn create_line(&self, name: &str) -> Result<Line, NetworkError> {
        let mut records = self.records.write();
        let line = Line::new(LineId::new(records.next_line), name)?;
        if records.line_named(line.name()) {
            return Err(NetworkError::DuplicateName {
                kind: "line",
                name: line.name().to_string(),
            });
        }

        records.next_line += 1;
        records.lines.insert(line.id(), line.clone());

        info!(line = %line.id(), name = line.name(), "line created");
        Ok(line)
    }

    /// All lines, ordered by id.
    pub fn lines(&self) -> Vec<Line> {
        self.records.read().lines.values().cloned().collect()
    }

    /// A line with its sections, ordered by section id.
    pub fn line(&self, id: LineId) -> Result<LineDetail, NetworkError> {
        let records = self.records.read();
        let line = records
            .lines
            .get(&id)
            .cloned()
            .ok_or(NetworkError::UnknownLine(id))?;
        let sections = records
            .sections
            .values()
            .filter(|s| s.line == id)
            .copied()
            .collect();
        Ok(LineDetail { line, sections })
    }

    /// Delete a line and every section on it.
    ///
    /// The sections leave the graph in one mutation; the line is forgotten
    /// only once that has succeeded.
    pub fn delete_line(&self, id: LineId) -> Result<LineDetail, NetworkError> {
        let mut records = self.records.write();
        if !records.lines.contains_key(&id) {
            return Err(NetworkError::UnknownLine(id));
        }

        let ids: Vec<SectionId> = records
            .sections
            .values()
            .filter(|s| s.line == id)
            .map(|s| s.id)
            .collect();
        let sections = self.graph.remove_sections(&ids)?;

        for section in &sections {
            records.sections.remove(&section.id);
        }
        let line = records
            .lines
            .remove(&id)
            .ok_or(NetworkError::UnknownLine(id))?;

        info!(line = %id, sections = sections.len(), "line deleted");
        Ok(LineDetail { line, sections })
    }

    /// Add a section (or a pair of opposite sections) to a line.
    pub fn add_section(
        &self,
        line: LineId,
        request: NewSection,
    ) -> Result<Vec<Section>, NetworkError> {
        let mut records = self.records.write();
        if !records.lines.contains_key(&line) {
            return Err(NetworkError::UnknownLine(line));
        }

        let forward = Section::new(
            SectionId::new(records.next_section),
            line,
            request.up,
            request.down,
            request.distance,
        );
        let mut added = vec![forward];
        if request.bidirectional {
            added.push(forward.reversed(SectionId::new(records.next_section + 1)));
        }
        self.graph.add_sections(&added)?;

        records.next_section += added.len() as u64;
        for section in &added {
            records.sections.insert(section.id, *section);
        }

        info!(
            %line,
            up = %request.up,
            down = %request.down,
            distance = request.distance,
            sections = added.len(),
            "section added"
        );
        Ok(added)
    }

    /// Delete one section.
    pub fn delete_section(&self, id: SectionId) -> Result<Section, NetworkError> {
        let mut records = self.records.write();
        let section = self.graph.remove_section(id)?;
        records.sections.remove(&id);

        info!(section = %id, line = %section.line, "section deleted");
        Ok(section)
    }

    /// Shortest route between two stations, with names resolved.
    pub fn route(&self, source: StationId, target: StationId) -> Result<Route, NetworkError> {
        let path = find_shortest_path(&self.graph, source, target)?;

        let records = self.records.read();
        let stations = path
            .stations
            .iter()
            .map(|id| {
                records
                    .stations
                    .get(id)
                    .cloned()
                    .ok_or(GraphError::UnknownStation(*id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Route { stations, path })
    }
}

/// First id after the largest one in use, or 1 if none are.
fn next_after(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{SeedLine, SeedSection, SeedStation};
    use crate::path::PathError;

    fn one_way(up: StationId, down: StationId, distance: i64) -> NewSection {
        NewSection {
            up,
            down,
            distance,
            bidirectional: false,
        }
    }

    fn two_way(up: StationId, down: StationId, distance: i64) -> NewSection {
        NewSection {
            bidirectional: true,
            ..one_way(up, down, distance)
        }
    }

    /// Gangnam - Yeoksam - Seolleung on line 2, plus an unconnected station.
    fn sample() -> (Network, [StationId; 4], LineId) {
        let network = Network::new();
        let a = network.create_station("Gangnam").unwrap().id();
        let b = network.create_station("Yeoksam").unwrap().id();
        let c = network.create_station("Seolleung").unwrap().id();
        let d = network.create_station("Island").unwrap().id();
        let line = network.create_line("Line 2").unwrap().id();
        network.add_section(line, two_way(a, b, 10)).unwrap();
        network.add_section(line, two_way(b, c, 5)).unwrap();
        (network, [a, b, c, d], line)
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let network = Network::new();
        let a = network.create_station("A").unwrap();
        let b = network.create_station("B").unwrap();
        assert_eq!(a.id(), StationId::new(1));
        assert_eq!(b.id(), StationId::new(2));
        assert_eq!(network.snapshot().station_count(), 2);
    }

    #[test]
    fn duplicate_station_name_rejected() {
        let network = Network::new();
        network.create_station("Gangnam").unwrap();
        assert_eq!(
            network.create_station(" Gangnam "),
            Err(NetworkError::DuplicateName {
                kind: "station",
                name: "Gangnam".into()
            })
        );
        assert_eq!(network.stations().len(), 1);
    }

    #[test]
    fn blank_names_rejected() {
        let network = Network::new();
        assert!(matches!(
            network.create_station(""),
            Err(NetworkError::Domain(_))
        ));
        assert!(matches!(
            network.create_line("  "),
            Err(NetworkError::Domain(_))
        ));
    }

    #[test]
    fn route_resolves_names() {
        let (network, [a, _, c, _], _) = sample();
        let route = network.route(a, c).unwrap();
        let names: Vec<&str> = route.stations.iter().map(Station::name).collect();
        assert_eq!(names, ["Gangnam", "Yeoksam", "Seolleung"]);
        assert_eq!(route.path.distance, 15);

        // Bidirectional sections allow the reverse trip
        let back = network.route(c, a).unwrap();
        assert_eq!(back.path.distance, 15);
    }

    #[test]
    fn route_errors_are_typed() {
        let (network, [a, _, _, d], _) = sample();
        assert_eq!(
            network.route(a, a),
            Err(NetworkError::Path(PathError::SameStation(a)))
        );
        assert_eq!(
            network.route(a, StationId::new(99)),
            Err(NetworkError::Path(PathError::StationNotFound(
                StationId::new(99)
            )))
        );
        assert_eq!(
            network.route(a, d),
            Err(NetworkError::Path(PathError::NoPath { from: a, to: d }))
        );
    }

    #[test]
    fn one_way_section_is_directed() {
        let network = Network::new();
        let a = network.create_station("A").unwrap().id();
        let b = network.create_station("B").unwrap().id();
        let line = network.create_line("L").unwrap().id();
        let added = network.add_section(line, one_way(a, b, 3)).unwrap();
        assert_eq!(added.len(), 1);
        assert!(network.route(a, b).is_ok());
        assert!(network.route(b, a).is_err());
    }

    #[test]
    fn add_section_errors_leave_state_unchanged() {
        let (network, [a, b, _, _], line) = sample();
        let before = network.snapshot().section_count();

        assert_eq!(
            network.add_section(LineId::new(42), two_way(a, b, 1)),
            Err(NetworkError::UnknownLine(LineId::new(42)))
        );
        assert!(matches!(
            network.add_section(line, two_way(a, b, 0)),
            Err(NetworkError::Graph(GraphError::InvalidDistance { .. }))
        ));
        assert!(matches!(
            network.add_section(line, two_way(a, a, 4)),
            Err(NetworkError::Graph(GraphError::SelfLoop { .. }))
        ));
        assert_eq!(
            network.add_section(line, two_way(a, StationId::new(77), 4)),
            Err(NetworkError::Graph(GraphError::UnknownStation(
                StationId::new(77)
            )))
        );

        assert_eq!(network.snapshot().section_count(), before);
        assert_eq!(network.line(line).unwrap().sections.len(), before);
    }

    #[test]
    fn station_in_use_cannot_be_deleted() {
        let (network, [_, b, _, d], _) = sample();
        assert!(matches!(
            network.delete_station(b),
            Err(NetworkError::Graph(GraphError::VertexInUse { .. }))
        ));
        assert!(network.station(b).is_some());

        let removed = network.delete_station(d).unwrap();
        assert_eq!(removed.name(), "Island");
        assert!(network.station(d).is_none());
        assert!(!network.snapshot().contains_station(d));
    }

    #[test]
    fn delete_unknown_station() {
        let network = Network::new();
        assert_eq!(
            network.delete_station(StationId::new(5)),
            Err(NetworkError::Graph(GraphError::UnknownStation(
                StationId::new(5)
            )))
        );
    }

    #[test]
    fn delete_section_then_station() {
        let (network, [a, b, c, _], line) = sample();
        let detail = network.line(line).unwrap();
        for section in detail.sections.iter().filter(|s| s.touches(c)) {
            network.delete_section(section.id).unwrap();
        }
        network.delete_station(c).unwrap();
        assert_eq!(network.route(a, b).unwrap().path.distance, 10);
        assert_eq!(network.line(line).unwrap().sections.len(), 2);
    }

    #[test]
    fn delete_unknown_section() {
        let (network, _, _) = sample();
        assert_eq!(
            network.delete_section(SectionId::new(500)),
            Err(NetworkError::Graph(GraphError::UnknownSection(
                SectionId::new(500)
            )))
        );
    }

    #[test]
    fn delete_line_removes_its_sections() {
        let (network, [a, b, c, _], line) = sample();
        let other = network.create_line("Shinbundang").unwrap().id();
        network.add_section(other, one_way(a, c, 30)).unwrap();

        let removed = network.delete_line(line).unwrap();
        assert_eq!(removed.sections.len(), 4);
        assert!(network.line(line).is_err());
        assert_eq!(network.snapshot().section_count(), 1);

        // Only the other line's section remains
        assert_eq!(network.route(a, c).unwrap().path.distance, 30);
        assert!(network.route(a, b).is_err());
    }

    #[test]
    fn readers_never_see_half_a_two_way_section() {
        let network = Network::new();
        let a = network.create_station("A").unwrap().id();
        let b = network.create_station("B").unwrap().id();
        let line = network.create_line("L").unwrap().id();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for distance in 1..500 {
                    network.add_section(line, two_way(a, b, distance)).unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..2000 {
                    assert_eq!(network.snapshot().section_count() % 2, 0);
                }
            });
        });

        assert_eq!(network.snapshot().section_count(), 998);
    }

    #[test]
    fn readers_see_a_line_delete_whole_or_not_at_all() {
        let (network, [a, _, c, _], line) = sample();
        let other = network.create_line("Shinbundang").unwrap().id();
        network.add_section(other, one_way(a, c, 30)).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| network.delete_line(line).unwrap());
            scope.spawn(|| {
                for _ in 0..500 {
                    let count = network.snapshot().section_count();
                    assert!(count == 5 || count == 1, "saw {count} sections");
                }
            });
        });

        assert!(network.lines().iter().all(|l| l.id() != line));
        assert_eq!(network.snapshot().section_count(), 1);
    }

    #[test]
    fn parallel_lines_pick_the_shorter_section() {
        let (network, [a, b, _, _], _) = sample();
        let express = network.create_line("Express").unwrap().id();
        let added = network.add_section(express, one_way(a, b, 4)).unwrap();

        let route = network.route(a, b).unwrap();
        assert_eq!(route.path.distance, 4);
        assert_eq!(route.path.sections, vec![added[0].id]);
    }

    fn seed() -> NetworkSeed {
        NetworkSeed {
            stations: vec![
                SeedStation {
                    id: StationId::new(10),
                    name: "Gangnam".into(),
                },
                SeedStation {
                    id: StationId::new(20),
                    name: "Yeoksam".into(),
                },
            ],
            lines: vec![SeedLine {
                id: LineId::new(2),
                name: "Line 2".into(),
            }],
            sections: vec![SeedSection {
                id: SectionId::new(5),
                line_id: LineId::new(2),
                up_station_id: StationId::new(10),
                down_station_id: StationId::new(20),
                distance: 10,
            }],
        }
    }

    #[test]
    fn from_seed_rebuilds_graph() {
        let network = Network::from_seed(seed()).unwrap();
        let route = network
            .route(StationId::new(10), StationId::new(20))
            .unwrap();
        assert_eq!(route.path.distance, 10);

        // Ids continue after the seeded ones
        let station = network.create_station("Seolleung").unwrap();
        assert_eq!(station.id(), StationId::new(21));
        let line = network.create_line("Line 9").unwrap();
        assert_eq!(line.id(), LineId::new(3));
        let sections = network
            .add_section(
                line.id(),
                one_way(StationId::new(20), station.id(), 5),
            )
            .unwrap();
        assert_eq!(sections[0].id, SectionId::new(6));
    }

    #[test]
    fn from_seed_rejects_unknown_line() {
        let mut seed = seed();
        seed.sections[0].line_id = LineId::new(9);
        assert_eq!(
            Network::from_seed(seed).unwrap_err(),
            NetworkError::UnknownLine(LineId::new(9))
        );
    }

    #[test]
    fn from_seed_rejects_bad_topology() {
        let mut seed = seed();
        seed.sections[0].distance = 0;
        assert!(matches!(
            Network::from_seed(seed),
            Err(NetworkError::Graph(GraphError::InvalidDistance { .. }))
        ));

        let mut seed = self::seed();
        seed.sections[0].down_station_id = StationId::new(99);
        assert_eq!(
            Network::from_seed(seed).unwrap_err(),
            NetworkError::Graph(GraphError::UnknownStation(StationId::new(99)))
        );
    }

    #[test]
    fn from_seed_rejects_duplicate_ids() {
        let mut seed = seed();
        seed.stations[1].id = StationId::new(10);
        assert!(matches!(
            Network::from_seed(seed),
            Err(NetworkError::InvalidSeed(_))
        ));

        let mut seed = self::seed();
        seed.lines.push(SeedLine {
            id: LineId::new(2),
            name: "Line 2 Branch".into(),
        });
        assert!(matches!(
            Network::from_seed(seed),
            Err(NetworkError::InvalidSeed(_))
        ));

        let mut seed = self::seed();
        let mut again = seed.sections[0];
        again.up_station_id = StationId::new(20);
        again.down_station_id = StationId::new(10);
        seed.sections.push(again);
        assert_eq!(
            Network::from_seed(seed).unwrap_err(),
            NetworkError::InvalidSeed("section id 5 appears twice".into())
        );
    }

    #[test]
    fn bundled_seed_prefers_line_3_detour() {
        let seed = NetworkSeed::load("data/seed.json").unwrap();
        let network = Network::from_seed(seed).unwrap();

        // Gyodae -> Nambu Bus Terminal -> Yangjae (5) beats Gyodae -> Gangnam -> Yangjae (20)
        let route = network
            .route(StationId::new(1), StationId::new(3))
            .unwrap();
        let names: Vec<&str> = route.stations.iter().map(Station::name).collect();
        assert_eq!(names, ["Gyodae", "Nambu Bus Terminal", "Yangjae"]);
        assert_eq!(route.path.distance, 5);
    }
}
