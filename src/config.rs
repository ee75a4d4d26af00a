//! Application configuration loaded from YAML.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{CatalogError, RegionCatalog},
    params::EarthquakeParameters,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub earthquake: EarthquakeParameters,
    /// Region catalog YAML; the built-in Nankai catalog is used when absent.
    #[serde(default)]
    pub regions_file: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_name() -> String {
    "nankai".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            earthquake: EarthquakeParameters::default(),
            regions_file: None,
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            base_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file. `regions_file` resolves relative
    /// to the file's directory.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn regions_path(&self) -> Option<PathBuf> {
        self.regions_file.as_ref().map(|file| match &self.base_dir {
            Some(base) if file.is_relative() => base.join(file),
            _ => file.clone(),
        })
    }

    pub fn load_catalog(&self) -> Result<RegionCatalog, ConfigError> {
        match self.regions_path() {
            Some(path) => Ok(RegionCatalog::load(path)?),
            None => Ok(RegionCatalog::nankai().clone()),
        }
    }
}
