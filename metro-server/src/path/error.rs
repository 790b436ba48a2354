//! Path query error types.

use crate::domain::StationId;

/// Errors from a shortest-path query.
///
/// These are expected, user-facing outcomes rather than faults, and are
/// checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Source and target are the same station
    #[error("source and target are the same station ({0})")]
    SameStation(StationId),

    /// Source or target is not a vertex of the graph
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// Target cannot be reached from source
    #[error("no path from station {from} to station {to}")]
    NoPath { from: StationId, to: StationId },
}
