pub mod catalog;
pub mod config;
pub mod geo;
pub mod model;
pub mod params;
pub mod report;
pub mod simulation;
pub mod telemetry;
pub mod web;

pub use catalog::{RegionCatalog, RegionRecord};
pub use params::EarthquakeParameters;
pub use simulation::{simulate, RegionResult, SimulationResult, SimulationSummary};
