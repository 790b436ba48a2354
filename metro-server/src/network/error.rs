//! Registry error types.

use crate::domain::{DomainError, LineId};
use crate::graph::GraphError;
use crate::path::PathError;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// Name validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The graph rejected the mutation
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Path query failed
    #[error(transparent)]
    Path(#[from] PathError),

    /// Referenced line does not exist
    #[error("unknown line {0}")]
    UnknownLine(LineId),

    /// A station or line with this name is already registered
    #[error("{kind} named {name:?} already exists")]
    DuplicateName { kind: &'static str, name: String },

    /// Seed data is inconsistent
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
}
