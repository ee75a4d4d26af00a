use serde::{Deserialize, Serialize};

use super::tiers::{Bound, ThresholdTable};

/// Share of households without each utility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UtilityOutage {
    pub electricity: f64,
    pub water: f64,
    pub gas: f64,
}

impl UtilityOutage {
    const fn new(electricity: f64, water: f64, gas: f64) -> Self {
        Self {
            electricity,
            water,
            gas,
        }
    }
}

pub const OUTAGE_TIERS: ThresholdTable<UtilityOutage> = ThresholdTable::new(
    Bound::Inclusive,
    &[
        (6.5, UtilityOutage::new(0.80, 0.90, 0.85)),
        (6.0, UtilityOutage::new(0.50, 0.60, 0.55)),
        (5.5, UtilityOutage::new(0.20, 0.30, 0.25)),
        (5.0, UtilityOutage::new(0.05, 0.05, 0.05)),
    ],
    UtilityOutage::new(0.0, 0.0, 0.0),
);

pub fn estimate_outage(intensity: f64) -> UtilityOutage {
    OUTAGE_TIERS.lookup(intensity)
}
