//! Domain types for the metro network.
//!
//! Identifiers are cheap `Copy` newtypes so the graph can key on them
//! directly. Named entities enforce their invariants at construction time,
//! so code that receives a `Station` or `Line` can trust its name.

mod error;
mod ids;
mod line;
mod section;
mod station;

pub use error::DomainError;
pub use ids::{LineId, SectionId, StationId};
pub use line::Line;
pub use section::Section;
pub use station::Station;
