//! Line type.

use serde::Serialize;

use super::{DomainError, LineId};

/// A named line. Sections carry the id of the line they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    id: LineId,
    name: String,
}

impl Line {
    /// Create a line, validating its name.
    pub fn new(id: LineId, name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::BlankName { kind: "line" });
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
