use serde::{Deserialize, Serialize};

use super::tiers::{Bound, ThresholdTable};
use crate::catalog::RegionRecord;

/// Damage rate pair for one construction class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRates {
    pub collapse: f64,
    pub severe: f64,
}

/// Rates for wooden and non-wooden stock at one intensity tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageTier {
    pub wooden: DamageRates,
    pub other: DamageRates,
}

impl DamageTier {
    const fn new(wooden: (f64, f64), other: (f64, f64)) -> Self {
        Self {
            wooden: DamageRates {
                collapse: wooden.0,
                severe: wooden.1,
            },
            other: DamageRates {
                collapse: other.0,
                severe: other.1,
            },
        }
    }

    /// Blends the two construction classes by the region's wooden share.
    pub fn blended(&self, wooden_ratio: f64) -> DamageRates {
        let other_ratio = 1.0 - wooden_ratio;
        DamageRates {
            collapse: self.wooden.collapse * wooden_ratio + self.other.collapse * other_ratio,
            severe: self.wooden.severe * wooden_ratio + self.other.severe * other_ratio,
        }
    }
}

pub const DAMAGE_TIERS: ThresholdTable<DamageTier> = ThresholdTable::new(
    Bound::Inclusive,
    &[
        (7.0, DamageTier::new((0.30, 0.40), (0.05, 0.15))),
        (6.5, DamageTier::new((0.15, 0.30), (0.02, 0.10))),
        (6.0, DamageTier::new((0.05, 0.15), (0.005, 0.05))),
        (5.5, DamageTier::new((0.01, 0.05), (0.0, 0.01))),
        (5.0, DamageTier::new((0.0, 0.01), (0.0, 0.0))),
    ],
    DamageTier::new((0.0, 0.0), (0.0, 0.0)),
);

const MODERATE_PER_SEVERE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildingDamage {
    pub collapsed: u64,
    pub severe: u64,
    pub moderate: u64,
    pub undamaged: u64,
}

impl BuildingDamage {
    pub fn total(&self) -> u64 {
        self.collapsed + self.severe + self.moderate + self.undamaged
    }
}

/// Building damage counts for a region at the given intensity.
///
/// Counts truncate toward zero. The moderate count is half the severe rate
/// applied to the full stock, not an independent tier.
pub fn estimate_building_damage(intensity: f64, region: &RegionRecord) -> BuildingDamage {
    let rates = DAMAGE_TIERS.lookup(intensity).blended(region.wooden_ratio);
    let stock = region.buildings as f64;

    let collapsed = truncate(stock * rates.collapse);
    let severe = truncate(stock * rates.severe);
    let moderate = truncate(stock * rates.severe * MODERATE_PER_SEVERE);
    let undamaged = region
        .buildings
        .saturating_sub(collapsed)
        .saturating_sub(severe)
        .saturating_sub(moderate);

    BuildingDamage {
        collapsed,
        severe,
        moderate,
        undamaged,
    }
}

fn truncate(value: f64) -> u64 {
    // `as` saturates and truncates toward zero; negative inputs become 0.
    value as u64
}
