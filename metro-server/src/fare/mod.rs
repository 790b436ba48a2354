//! Distance-based fares.
//!
//! A fare is a pure function of travelled distance under a tiered schedule.
//! The schedule is data ([`FareTable`]), so an alternative one can be loaded
//! without touching the calculation.

mod error;
mod table;

pub use error::FareError;
pub use table::{FareTable, FareTier, calculate_fare};
