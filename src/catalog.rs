use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

/// Static reference data for one municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub population: u64,
    pub buildings: u64,
    pub wooden_ratio: f64,
    pub coastal: bool,
    pub elevation_m: f64,
}

impl RegionRecord {
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        name: &str,
        lat: f64,
        lon: f64,
        population: u64,
        buildings: u64,
        wooden_ratio: f64,
        coastal: bool,
        elevation_m: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
            population,
            buildings,
            wooden_ratio,
            coastal,
            elevation_m,
        }
    }

    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read region catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse region catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("region catalog validation error: {0}")]
    Validation(String),
}

#[derive(Deserialize)]
struct CatalogFile {
    regions: Vec<RegionRecord>,
}

/// Immutable, ordered list of regions. Simulation output follows this order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCatalog {
    regions: Vec<RegionRecord>,
}

static NANKAI: OnceLock<RegionCatalog> = OnceLock::new();

impl RegionCatalog {
    /// The eight coastal-belt cities used by the dashboard.
    pub fn nankai() -> &'static RegionCatalog {
        NANKAI.get_or_init(|| RegionCatalog {
            regions: vec![
                RegionRecord::builtin("静岡市", 34.9756, 138.3827, 700_000, 280_000, 0.4, true, 20.0),
                RegionRecord::builtin("浜松市", 34.7108, 137.7261, 800_000, 320_000, 0.45, true, 10.0),
                RegionRecord::builtin("名古屋市", 35.1815, 136.9066, 2_300_000, 920_000, 0.3, false, 15.0),
                RegionRecord::builtin("津市", 34.7185, 136.5056, 280_000, 112_000, 0.5, true, 5.0),
                RegionRecord::builtin("大阪市", 34.6937, 135.5023, 2_700_000, 1_080_000, 0.25, true, 5.0),
                RegionRecord::builtin("和歌山市", 34.2306, 135.1708, 360_000, 144_000, 0.45, true, 8.0),
                RegionRecord::builtin("高知市", 33.5597, 133.5311, 330_000, 132_000, 0.5, true, 3.0),
                RegionRecord::builtin("徳島市", 34.0658, 134.5594, 260_000, 104_000, 0.48, true, 2.0),
            ],
        })
    }

    pub fn new(regions: Vec<RegionRecord>) -> Result<Self, CatalogError> {
        let catalog = Self { regions };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(text)?;
        Self::new(file.regions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.regions.is_empty() {
            return Err(CatalogError::Validation(
                "catalog must define at least one region".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.name.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "region '{}' defined more than once",
                    region.name
                )));
            }
            if !(0.0..=1.0).contains(&region.wooden_ratio) {
                return Err(CatalogError::Validation(format!(
                    "region '{}' has wooden_ratio {} outside 0..=1",
                    region.name, region.wooden_ratio
                )));
            }
            if region.elevation_m.is_nan() || region.elevation_m < 0.0 {
                return Err(CatalogError::Validation(format!(
                    "region '{}' has negative elevation",
                    region.name
                )));
            }
            if !(-90.0..=90.0).contains(&region.lat) || !(-180.0..=180.0).contains(&region.lon) {
                return Err(CatalogError::Validation(format!(
                    "region '{}' has invalid coordinates ({}, {})",
                    region.name, region.lat, region.lon
                )));
            }
        }
        Ok(())
    }

    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionRecord> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RegionRecord> {
        self.regions.iter().find(|region| region.name == name)
    }
}

impl<'a> IntoIterator for &'a RegionCatalog {
    type Item = &'a RegionRecord;
    type IntoIter = std::slice::Iter<'a, RegionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
