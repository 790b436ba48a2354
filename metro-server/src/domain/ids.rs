//! Identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Stable identifier of a station, and of its vertex in the topology.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_server::domain::StationId;
    ///
    /// let id = StationId::new(7);
    /// assert_eq!(id.get(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    StationId
}

id_type! {
    /// Identifier of a line. Lines only group sections; they are not part
    /// of the path computation.
    LineId
}

id_type! {
    /// Identifier of a single section, i.e. one edge instance in the
    /// multigraph.
    SectionId
}
