//! Graph store error types.

use crate::domain::{SectionId, StationId};

/// Errors from topology mutations.
///
/// Every variant is returned before any state changes, so a failed
/// mutation leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A referenced station is not a vertex of the graph
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// A referenced section is not an edge of the graph
    #[error("unknown section {0}")]
    UnknownSection(SectionId),

    /// An edge with this id is already present
    #[error("section {0} already exists")]
    DuplicateSection(SectionId),

    /// Section distance must be strictly positive
    #[error("invalid distance {distance} for section {section}: must be positive")]
    InvalidDistance { section: SectionId, distance: i64 },

    /// Section connects a station to itself
    #[error("section {section} connects station {station} to itself")]
    SelfLoop {
        section: SectionId,
        station: StationId,
    },

    /// Station still has sections attached
    #[error("station {station} is still used by {sections} section(s)")]
    VertexInUse { station: StationId, sections: usize },
}
