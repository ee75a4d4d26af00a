use crate::{catalog::RegionRecord, geo::haversine_km, params::EarthquakeParameters};

pub const MAX_INTENSITY: f64 = 7.0;
const MIN_DISTANCE_KM: f64 = 1.0;

/// Simplified shaking intensity at a region, clamped to `0..=7`.
pub fn seismic_intensity(earthquake: &EarthquakeParameters, region: &RegionRecord) -> f64 {
    let distance = haversine_km(earthquake.epicenter(), region.location());
    intensity_at(earthquake, distance)
}

/// Intensity for a given epicentral distance in kilometres.
pub fn intensity_at(earthquake: &EarthquakeParameters, distance_km: f64) -> f64 {
    let distance = distance_km.max(MIN_DISTANCE_KM);
    let raw = earthquake.magnitude - 3.5 * distance.log10() - 0.006 * distance + 1.5;
    // Shallower sources attenuate less.
    let depth_factor = 1.0 - (earthquake.depth_km / 100.0) * 0.3;
    (raw * depth_factor).clamp(0.0, MAX_INTENSITY)
}
