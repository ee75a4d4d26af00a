use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

pub const MAGNITUDE_RANGE: RangeInclusive<f64> = 7.0..=9.0;
pub const DEPTH_KM_RANGE: RangeInclusive<f64> = 5.0..=50.0;
pub const LATITUDE_RANGE: RangeInclusive<f64> = 30.0..=36.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = 130.0..=140.0;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Hypothetical earthquake source. Constructed once per run and never mutated.
///
/// Deserializing requires all four fields by name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EarthquakeParameters {
    pub magnitude: f64,
    pub depth_km: f64,
    pub epicenter_lat: f64,
    pub epicenter_lon: f64,
}

impl Default for EarthquakeParameters {
    fn default() -> Self {
        Self {
            magnitude: 8.7,
            depth_km: 10.0,
            epicenter_lat: 33.0,
            epicenter_lon: 136.0,
        }
    }
}

impl EarthquakeParameters {
    /// Builds parameters, rejecting anything outside the dashboard input ranges.
    pub fn new(
        magnitude: f64,
        depth_km: f64,
        epicenter_lat: f64,
        epicenter_lon: f64,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            magnitude,
            depth_km,
            epicenter_lat,
            epicenter_lon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Snaps every field into its allowed range, like a slider would.
    /// Non-finite values fall back to the default for that field.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            magnitude: clamp_to(self.magnitude, &MAGNITUDE_RANGE, defaults.magnitude),
            depth_km: clamp_to(self.depth_km, &DEPTH_KM_RANGE, defaults.depth_km),
            epicenter_lat: clamp_to(self.epicenter_lat, &LATITUDE_RANGE, defaults.epicenter_lat),
            epicenter_lon: clamp_to(self.epicenter_lon, &LONGITUDE_RANGE, defaults.epicenter_lon),
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check("magnitude", self.magnitude, &MAGNITUDE_RANGE)?;
        check("depth_km", self.depth_km, &DEPTH_KM_RANGE)?;
        check("epicenter_lat", self.epicenter_lat, &LATITUDE_RANGE)?;
        check("epicenter_lon", self.epicenter_lon, &LONGITUDE_RANGE)?;
        Ok(())
    }

    pub fn epicenter(&self) -> Coordinate {
        Coordinate::new(self.epicenter_lat, self.epicenter_lon)
    }
}

fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field });
    }
    if !range.contains(&value) {
        return Err(ParameterError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}
