use serde::{Deserialize, Serialize};

use super::{building::BuildingDamage, tsunami::TsunamiImpact};
use crate::catalog::RegionRecord;

const DEATHS_PER_COLLAPSE: f64 = 0.01;
const INJURIES_PER_DAMAGED: f64 = 0.05;
const MAX_EVACUATION_RATE: f64 = 0.8;
const HIGH_WAVE_M: f64 = 2.0;
const HIGH_WAVE_FATALITY: f64 = 0.1;
const LOW_WAVE_FATALITY: f64 = 0.02;
const TSUNAMI_INJURY_RATE: f64 = 0.2;
const SERIOUS_SHARE: f64 = 0.3;
const MINOR_SHARE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Casualties {
    pub deaths: u64,
    pub serious_injuries: u64,
    pub minor_injuries: u64,
}

impl Casualties {
    pub fn injuries(&self) -> u64 {
        self.serious_injuries + self.minor_injuries
    }
}

/// Deaths and injuries from building collapse plus tsunami exposure.
///
/// Every intermediate head count truncates toward zero, so the serious and
/// minor split can sum to one less than the raw injury total.
pub fn estimate_casualties(
    damage: &BuildingDamage,
    tsunami: &TsunamiImpact,
    region: &RegionRecord,
) -> Casualties {
    let building_deaths = truncate(damage.collapsed as f64 * DEATHS_PER_COLLAPSE);
    let building_injuries = truncate((damage.collapsed + damage.severe) as f64 * INJURIES_PER_DAMAGED);

    let (tsunami_deaths, tsunami_injuries) = if tsunami.is_hit() {
        let affected = truncate(region.population as f64 * tsunami.inundation_fraction);
        // More warning time means more people get out.
        let evacuation_rate = (tsunami.arrival_min / 60.0).min(MAX_EVACUATION_RATE);
        let non_evacuated = affected as f64 * (1.0 - evacuation_rate);
        let fatality = if tsunami.height_m > HIGH_WAVE_M {
            HIGH_WAVE_FATALITY
        } else {
            LOW_WAVE_FATALITY
        };
        (
            truncate(non_evacuated * fatality),
            truncate(non_evacuated * TSUNAMI_INJURY_RATE),
        )
    } else {
        (0, 0)
    };

    let injuries = (building_injuries + tsunami_injuries) as f64;
    Casualties {
        deaths: building_deaths + tsunami_deaths,
        serious_injuries: truncate(injuries * SERIOUS_SHARE),
        minor_injuries: truncate(injuries * MINOR_SHARE),
    }
}

fn truncate(value: f64) -> u64 {
    value as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(population: u64) -> RegionRecord {
        RegionRecord {
            name: "test".into(),
            lat: 33.0,
            lon: 135.0,
            population,
            buildings: 100_000,
            wooden_ratio: 0.5,
            coastal: true,
            elevation_m: 1.0,
        }
    }

    #[test]
    fn building_only_casualties() {
        let damage = BuildingDamage {
            collapsed: 1_000,
            severe: 3_000,
            moderate: 1_500,
            undamaged: 94_500,
        };
        let result = estimate_casualties(&damage, &TsunamiImpact::default(), &region(50_000));
        assert_eq!(result.deaths, 10);
        // 200 injuries split 30/70
        assert_eq!(result.serious_injuries, 60);
        assert_eq!(result.minor_injuries, 140);
    }

    #[test]
    fn high_wave_with_short_warning() {
        let tsunami = TsunamiImpact {
            height_m: 6.2,
            arrival_min: 20.0,
            inundation_fraction: 0.3,
        };
        let result = estimate_casualties(&BuildingDamage::default(), &tsunami, &region(330_000));
        // affected 99,000; evacuation 1/3; non-evacuated 66,000
        assert_eq!(result.deaths, 6_600);
        assert_eq!(result.serious_injuries, 3_960);
        assert_eq!(result.minor_injuries, 9_240);
    }

    #[test]
    fn evacuation_is_capped() {
        let tsunami = TsunamiImpact {
            height_m: 1.5,
            arrival_min: 120.0,
            inundation_fraction: 0.05,
        };
        let result = estimate_casualties(&BuildingDamage::default(), &tsunami, &region(100_000));
        // affected 5,000; 20% stay. 1 − 0.8 is just under 0.2 in binary, so
        // the 1,000 non-evacuated truncate to 19 deaths and 199 injuries.
        assert_eq!(result.deaths, 19);
        assert_eq!(result.serious_injuries, 59);
        assert_eq!(result.minor_injuries, 139);
    }

    #[test]
    fn zero_height_means_no_tsunami_casualties() {
        let tsunami = TsunamiImpact {
            height_m: 0.0,
            arrival_min: 26.0,
            inundation_fraction: 0.05,
        };
        let result = estimate_casualties(&BuildingDamage::default(), &tsunami, &region(700_000));
        assert_eq!(result, Casualties::default());
    }

    #[test]
    fn injury_split_truncates() {
        let damage = BuildingDamage {
            collapsed: 0,
            severe: 20,
            moderate: 10,
            undamaged: 0,
        };
        // 1 injury → 0.3 and 0.7 both truncate to 0
        let result = estimate_casualties(&damage, &TsunamiImpact::default(), &region(100));
        assert_eq!(result.injuries(), 0);
    }
}
