//! Domain error types.
//!
//! These errors represent validation failures of named entities. Topology
//! errors (unknown stations, self-loops, ...) belong to the graph layer.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A station or line name was empty or whitespace only
    #[error("{kind} name must not be blank")]
    BlankName { kind: &'static str },
}
