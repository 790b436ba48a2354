//! Seed files describing a full network.
//!
//! At startup the graph is rebuilt from the complete station/line/section
//! set. The set is read from a JSON file of the form:
//!
//! ```json
//! {
//!   "stations": [{ "id": 1, "name": "Gangnam" }],
//!   "lines": [{ "id": 1, "name": "Line 2" }],
//!   "sections": [
//!     { "id": 1, "line_id": 1, "up_station_id": 1, "down_station_id": 2, "distance": 10 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, Section, SectionId, StationId};

/// Errors from reading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// File could not be read
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not a valid seed document
    #[error("failed to parse seed file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A station record in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStation {
    pub id: StationId,
    pub name: String,
}

/// A line record in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLine {
    pub id: LineId,
    pub name: String,
}

/// A section record in a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSection {
    pub id: SectionId,
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: i64,
}

impl From<SeedSection> for Section {
    fn from(s: SeedSection) -> Self {
        Section::new(
            s.id,
            s.line_id,
            s.up_station_id,
            s.down_station_id,
            s.distance,
        )
    }
}

/// The full persisted network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSeed {
    #[serde(default)]
    pub stations: Vec<SeedStation>,
    #[serde(default)]
    pub lines: Vec<SeedLine>,
    #[serde(default)]
    pub sections: Vec<SeedSection>,
}

impl NetworkSeed {
    /// Parse a seed document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a seed document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| SeedError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
