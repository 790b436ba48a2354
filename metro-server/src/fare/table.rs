//! Tiered fare schedule.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::FareError;

/// Surcharge added per started billing unit unless a tier says otherwise.
const DEFAULT_UNIT_FARE: u64 = 100;

fn default_unit_fare() -> u64 {
    DEFAULT_UNIT_FARE
}

/// One distance band of the schedule.
///
/// A tier applies to distances strictly above `threshold` (the first tier
/// also covers `threshold` itself, i.e. zero). Within the tier the fare is
/// `base_fare` plus `unit_fare` for every started `billing_unit` beyond
/// the threshold. A tier without a billing unit is flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareTier {
    pub threshold: u64,
    pub base_fare: u64,
    #[serde(default)]
    pub billing_unit: Option<u64>,
    #[serde(default = "default_unit_fare")]
    pub unit_fare: u64,
}

impl FareTier {
    /// A tier charging `base_fare` regardless of distance.
    pub const fn flat(threshold: u64, base_fare: u64) -> Self {
        Self {
            threshold,
            base_fare,
            billing_unit: None,
            unit_fare: DEFAULT_UNIT_FARE,
        }
    }

    /// A tier charging the default surcharge per started `billing_unit`.
    pub const fn per_unit(threshold: u64, base_fare: u64, billing_unit: u64) -> Self {
        Self {
            threshold,
            base_fare,
            billing_unit: Some(billing_unit),
            unit_fare: DEFAULT_UNIT_FARE,
        }
    }

    fn fare(&self, distance: u64) -> u64 {
        match self.billing_unit {
            None => self.base_fare,
            Some(unit) => {
                let overage = distance.saturating_sub(self.threshold);
                let units = overage.div_ceil(unit);
                self.base_fare
                    .saturating_add(units.saturating_mul(self.unit_fare))
            }
        }
    }
}

/// An ordered, validated list of fare tiers.
///
/// # Examples
///
/// ```
/// use metro_server::fare::FareTable;
///
/// let table = FareTable::default();
/// assert_eq!(table.fare(10).unwrap(), 1250);
/// assert_eq!(table.fare(11).unwrap(), 1350);
/// assert_eq!(table.fare(51).unwrap(), 2150);
/// assert!(table.fare(-1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FareTier>", into = "Vec<FareTier>")]
pub struct FareTable {
    tiers: Vec<FareTier>,
}

impl FareTable {
    /// Build a table, checking that tiers start at zero, are strictly
    /// increasing and have non-zero billing units.
    pub fn new(tiers: Vec<FareTier>) -> Result<Self, FareError> {
        let first = tiers
            .first()
            .ok_or(FareError::InvalidTable("at least one tier is required"))?;
        if first.threshold != 0 {
            return Err(FareError::InvalidTable("first tier must start at 0"));
        }
        if tiers.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
            return Err(FareError::InvalidTable(
                "tier thresholds must be strictly increasing",
            ));
        }
        if tiers.iter().any(|t| t.billing_unit == Some(0)) {
            return Err(FareError::InvalidTable("billing unit must be positive"));
        }
        Ok(Self { tiers })
    }

    /// Parse a table from its JSON form: an array of tiers.
    pub fn from_json(json: &str) -> Result<Self, FareError> {
        serde_json::from_str(json).map_err(|e| FareError::Parse(e.to_string()))
    }

    /// The tiers, lowest threshold first.
    pub fn tiers(&self) -> &[FareTier] {
        &self.tiers
    }

    /// Fare for travelling `distance`.
    pub fn fare(&self, distance: i64) -> Result<u64, FareError> {
        let distance = u64::try_from(distance).map_err(|_| FareError::InvalidDistance(distance))?;
        let tier = self
            .tiers
            .iter()
            .rev()
            .find(|t| t.threshold < distance)
            .unwrap_or(&self.tiers[0]);
        Ok(tier.fare(distance))
    }
}

impl Default for FareTable {
    /// The standard schedule: 1250 up to 10, +100 per started 5 up to 50,
    /// then +100 per started 8.
    fn default() -> Self {
        Self {
            tiers: vec![
                FareTier::flat(0, 1250),
                FareTier::per_unit(10, 1250, 5),
                FareTier::per_unit(50, 2050, 8),
            ],
        }
    }
}

impl TryFrom<Vec<FareTier>> for FareTable {
    type Error = FareError;

    fn try_from(tiers: Vec<FareTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<FareTable> for Vec<FareTier> {
    fn from(table: FareTable) -> Self {
        table.tiers
    }
}

static STANDARD: LazyLock<FareTable> = LazyLock::new(FareTable::default);

/// Fare for `distance` under the standard schedule.
pub fn calculate_fare(distance: i64) -> Result<u64, FareError> {
    STANDARD.fare(distance)
}
