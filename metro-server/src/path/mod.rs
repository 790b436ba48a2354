//! Shortest-path queries over topology snapshots.
//!
//! Queries never touch the graph store's lock beyond taking a snapshot:
//! the search itself runs on an immutable [`Topology`](crate::graph::Topology).

mod dijkstra;
mod error;

pub use dijkstra::{PathFinder, PathResult, find_shortest_path};
pub use error::PathError;
