//! In-memory topology of the metro network.
//!
//! The graph is a directed multigraph: vertices are station ids, edges are
//! sections weighted by their distance. [`GraphStore`] owns the canonical
//! copy behind a reader-writer lock and hands out immutable [`Topology`]
//! snapshots for queries.

mod error;
mod store;
mod topology;

pub use error::GraphError;
pub use store::GraphStore;
pub use topology::{Edge, Topology};
