//! Station type.

use serde::Serialize;

use super::{DomainError, StationId};

/// A named station.
///
/// The name is trimmed and must be non-empty. Stations are immutable once
/// created.
///
/// # Examples
///
/// ```
/// use metro_server::domain::{Station, StationId};
///
/// let station = Station::new(StationId::new(1), "  Gangnam ").unwrap();
/// assert_eq!(station.name(), "Gangnam");
///
/// // Blank names are rejected
/// assert!(Station::new(StationId::new(2), "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station, validating its name.
    pub fn new(id: StationId, name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::BlankName { kind: "station" });
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    /// The station's identifier.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// The station's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
