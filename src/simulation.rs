use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::{RegionCatalog, RegionRecord},
    model::{
        economic_loss_oku_yen, estimate_building_damage, estimate_casualties, estimate_outage,
        estimate_tsunami, seismic_intensity, BuildingDamage, Casualties, TsunamiImpact,
        UtilityOutage,
    },
    params::EarthquakeParameters,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResult {
    pub region_name: String,
    pub intensity: f64,
    pub building_damage: BuildingDamage,
    pub tsunami: TsunamiImpact,
    pub casualties: Casualties,
    pub infrastructure_outage: UtilityOutage,
    /// 億円
    pub economic_loss: f64,
}

/// Per-region results in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationResult {
    regions: Vec<RegionResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub deaths: u64,
    pub injuries: u64,
    pub collapsed_buildings: u64,
    pub severe_buildings: u64,
    pub economic_loss: f64,
}

impl SimulationResult {
    pub fn regions(&self) -> &[RegionResult] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionResult> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, name: &str) -> Option<&RegionResult> {
        self.regions.iter().find(|result| result.region_name == name)
    }

    /// Regions that report a non-zero wave height.
    pub fn tsunami_regions(&self) -> impl Iterator<Item = &RegionResult> {
        self.regions.iter().filter(|result| result.tsunami.is_hit())
    }

    pub fn summary(&self) -> SimulationSummary {
        self.regions
            .iter()
            .fold(SimulationSummary::default(), |mut acc, result| {
                acc.deaths += result.casualties.deaths;
                acc.injuries += result.casualties.injuries();
                acc.collapsed_buildings += result.building_damage.collapsed;
                acc.severe_buildings += result.building_damage.severe;
                acc.economic_loss += result.economic_loss;
                acc
            })
    }

    pub fn into_regions(self) -> Vec<RegionResult> {
        self.regions
    }
}

impl<'a> IntoIterator for &'a SimulationResult {
    type Item = &'a RegionResult;
    type IntoIter = std::slice::Iter<'a, RegionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// Runs every model for each region of the catalog, in order.
pub fn simulate(earthquake: &EarthquakeParameters, regions: &RegionCatalog) -> SimulationResult {
    let regions = regions
        .iter()
        .map(|region| simulate_region(earthquake, region))
        .collect();
    SimulationResult { regions }
}

pub fn simulate_region(earthquake: &EarthquakeParameters, region: &RegionRecord) -> RegionResult {
    let intensity = seismic_intensity(earthquake, region);
    let building_damage = estimate_building_damage(intensity, region);
    let tsunami = estimate_tsunami(earthquake, region);
    let casualties = estimate_casualties(&building_damage, &tsunami, region);
    let infrastructure_outage = estimate_outage(intensity);
    let economic_loss = economic_loss_oku_yen(&building_damage);

    debug!(
        region = %region.name,
        intensity,
        collapsed = building_damage.collapsed,
        tsunami_m = tsunami.height_m,
        deaths = casualties.deaths,
        "region estimated"
    );

    RegionResult {
        region_name: region.name.clone(),
        intensity,
        building_damage,
        tsunami,
        casualties,
        infrastructure_outage,
        economic_loss,
    }
}
