//! Fare error types.

/// Errors from fare calculation and schedule construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// Distance was negative
    #[error("invalid distance {0}: must not be negative")]
    InvalidDistance(i64),

    /// Tier list violates the schedule rules
    #[error("invalid fare table: {0}")]
    InvalidTable(&'static str),

    /// Schedule JSON could not be parsed
    #[error("failed to parse fare table: {0}")]
    Parse(String),
}
