use serde::{Deserialize, Serialize};

use super::tiers::{Bound, ThresholdTable};
use crate::{catalog::RegionRecord, geo::haversine_km, params::EarthquakeParameters};

/// Source wave height in metres by magnitude.
pub const BASE_HEIGHT_M: ThresholdTable<f64> =
    ThresholdTable::new(Bound::Inclusive, &[(8.0, 10.0), (7.5, 5.0)], 2.0);

/// Share of the population exposed to flooding by wave height.
pub const INUNDATION_FRACTION: ThresholdTable<f64> =
    ThresholdTable::new(Bound::Exclusive, &[(5.0, 0.3), (2.0, 0.15), (0.0, 0.05)], 0.0);

const DECAY_LENGTH_KM: f64 = 500.0;
/// Propagation speed in km per minute.
const WAVE_SPEED_KM_PER_MIN: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TsunamiImpact {
    /// Reported wave height, rounded to 0.1 m.
    pub height_m: f64,
    /// Reported arrival time, rounded to whole minutes.
    pub arrival_min: f64,
    pub inundation_fraction: f64,
}

impl TsunamiImpact {
    pub fn is_hit(&self) -> bool {
        self.height_m > 0.0
    }
}

pub fn estimate_tsunami(earthquake: &EarthquakeParameters, region: &RegionRecord) -> TsunamiImpact {
    if !region.coastal {
        return TsunamiImpact::default();
    }
    let distance = haversine_km(earthquake.epicenter(), region.location());
    tsunami_at(earthquake.magnitude, distance, region.elevation_m)
}

/// Tsunami impact for a coastal site `distance_km` from the source.
pub fn tsunami_at(magnitude: f64, distance_km: f64, elevation_m: f64) -> TsunamiImpact {
    let mut height = BASE_HEIGHT_M.lookup(magnitude) * (-distance_km / DECAY_LENGTH_KM).exp();
    if elevation_m > height {
        height = 0.0;
    }
    let arrival = distance_km / WAVE_SPEED_KM_PER_MIN;

    TsunamiImpact {
        height_m: round_to(height, 1),
        arrival_min: arrival.round(),
        inundation_fraction: INUNDATION_FRACTION.lookup(height),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
