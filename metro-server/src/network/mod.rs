//! In-memory registry of stations, lines and sections.
//!
//! The registry owns names and identifiers and is the only writer of the
//! [`GraphStore`](crate::graph::GraphStore): every create/delete request is
//! validated here, applied to the graph in a single mutation, and only then
//! recorded. Readers get immutable snapshots.

mod error;
mod registry;
mod seed;

pub use error::NetworkError;
pub use registry::{LineDetail, Network, NewSection, Route};
pub use seed::{NetworkSeed, SeedError, SeedLine, SeedSection, SeedStation};
