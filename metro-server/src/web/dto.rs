//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, LineId, Section, SectionId, Station, StationId};
use crate::network::{LineDetail, NewSection, Route};

/// Request to create a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    /// Display name
    pub name: String,
}

/// A station.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationResult {
    pub id: StationId,
    pub name: String,
}

/// Request to create a line.
#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    /// Display name
    pub name: String,
}

/// A line without its sections.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineResult {
    pub id: LineId,
    pub name: String,
}

/// A line with its sections.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineDetailResult {
    pub id: LineId,
    pub name: String,
    pub sections: Vec<SectionResult>,
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub up_station_id: StationId,
    pub down_station_id: StationId,

    /// Signed so that negative input reaches validation
    pub distance: i64,

    /// Also add the opposite direction (default: true)
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

fn default_bidirectional() -> bool {
    true
}

/// A section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionResult {
    pub id: SectionId,
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: i64,
}

/// Query for a shortest path.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: StationId,
    pub target: StationId,
}

/// Shortest path with its fare.
#[derive(Debug, Serialize, Deserialize)]
pub struct PathResponse {
    /// Stations in travel order, source first
    pub stations: Vec<StationResult>,

    /// Total distance
    pub distance: u64,

    /// Fare for the total distance
    pub fare: u64,
}

/// Query for a fare.
#[derive(Debug, Deserialize)]
pub struct FareQuery {
    pub distance: i64,
}

/// Fare for a distance.
#[derive(Debug, Serialize, Deserialize)]
pub struct FareResponse {
    pub distance: i64,
    pub fare: u64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id(),
            name: station.name().to_string(),
        }
    }
}

impl From<&Line> for LineResult {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id(),
            name: line.name().to_string(),
        }
    }
}

impl From<&Section> for SectionResult {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id,
            line_id: section.line,
            up_station_id: section.up,
            down_station_id: section.down,
            distance: section.distance,
        }
    }
}

impl From<&LineDetail> for LineDetailResult {
    fn from(detail: &LineDetail) -> Self {
        Self {
            id: detail.line.id(),
            name: detail.line.name().to_string(),
            sections: detail.sections.iter().map(SectionResult::from).collect(),
        }
    }
}

impl From<&CreateSectionRequest> for NewSection {
    fn from(req: &CreateSectionRequest) -> Self {
        Self {
            up: req.up_station_id,
            down: req.down_station_id,
            distance: req.distance,
            bidirectional: req.bidirectional,
        }
    }
}

impl PathResponse {
    /// Create from a resolved route and its fare.
    pub fn from_route(route: &Route, fare: u64) -> Self {
        Self {
            stations: route.stations.iter().map(StationResult::from).collect(),
            distance: route.path.distance,
            fare,
        }
    }
}
