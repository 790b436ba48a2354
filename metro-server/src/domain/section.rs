//! Section type.

use serde::{Deserialize, Serialize};

use super::{LineId, SectionId, StationId};

/// A directed, weighted connection between two stations on a line.
///
/// This is the raw section event handed to the graph store. The store is
/// the one that rejects non-positive distances and self-loops, so the
/// distance is kept signed here and malformed input stays representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub line: LineId,
    pub up: StationId,
    pub down: StationId,
    pub distance: i64,
}

impl Section {
    /// Create a section event.
    pub fn new(
        id: SectionId,
        line: LineId,
        up: StationId,
        down: StationId,
        distance: i64,
    ) -> Self {
        Self {
            id,
            line,
            up,
            down,
            distance,
        }
    }

    /// The same connection travelled the other way, under a new id.
    pub fn reversed(&self, id: SectionId) -> Self {
        Self {
            id,
            line: self.line,
            up: self.down,
            down: self.up,
            distance: self.distance,
        }
    }

    /// Whether the section touches the given station at either end.
    pub fn touches(&self, station: StationId) -> bool {
        self.up == station || self.down == station
    }
}
