use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    params::EarthquakeParameters,
    simulation::{RegionResult, SimulationResult, SimulationSummary},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DASHBOARD_HEADERS: [&str; 11] = [
    "地域",
    "推定震度",
    "全壊建物",
    "半壊建物",
    "津波高(m)",
    "津波到達時間(分)",
    "死者",
    "負傷者",
    "停電世帯率",
    "断水世帯率",
    "経済被害(億円)",
];

pub const DETAILED_HEADERS: [&str; 16] = [
    "region_name",
    "intensity",
    "collapsed",
    "severe",
    "moderate",
    "undamaged",
    "tsunami_height_m",
    "tsunami_arrival_min",
    "inundation_fraction",
    "deaths",
    "serious_injuries",
    "minor_injuries",
    "electricity_outage",
    "water_outage",
    "gas_outage",
    "economic_loss",
];

/// A finished run with its inputs and headline totals, as served to the
/// dashboard and written by `run --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: EarthquakeParameters,
    pub summary: SimulationSummary,
    pub regions: SimulationResult,
}

impl SimulationReport {
    pub fn new(parameters: EarthquakeParameters, regions: SimulationResult) -> Self {
        Self {
            generated_at: Utc::now(),
            parameters,
            summary: regions.summary(),
            regions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvLayout {
    /// Rounded, Japanese-labelled columns as shown in the dashboard table.
    #[default]
    Dashboard,
    /// Every result field at full precision.
    Detailed,
}

#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub layout: CsvLayout,
    /// Prefix a UTF-8 byte order mark so spreadsheet tools detect the encoding.
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            layout: CsvLayout::Dashboard,
            bom: true,
        }
    }
}

pub fn write_csv<W: Write>(
    result: &SimulationResult,
    mut writer: W,
    options: CsvOptions,
) -> io::Result<()> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }
    let headers: &[&str] = match options.layout {
        CsvLayout::Dashboard => &DASHBOARD_HEADERS,
        CsvLayout::Detailed => &DETAILED_HEADERS,
    };
    write_row(&mut writer, headers.iter().map(|h| h.to_string()))?;
    for region in result {
        let row = match options.layout {
            CsvLayout::Dashboard => dashboard_row(region),
            CsvLayout::Detailed => detailed_row(region),
        };
        write_row(&mut writer, row)?;
    }
    writer.flush()
}

pub fn to_csv_string(result: &SimulationResult, options: CsvOptions) -> String {
    let mut buf = Vec::new();
    write_csv(result, &mut buf, options).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("CSV cells are UTF-8 strings")
}

pub fn write_csv_file(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    options: CsvOptions,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(result, BufWriter::new(file), options)
}

/// Formatted cells for the dashboard table, in `DASHBOARD_HEADERS` order.
pub fn dashboard_row(region: &RegionResult) -> Vec<String> {
    vec![
        region.region_name.clone(),
        format!("{:.1}", region.intensity),
        region.building_damage.collapsed.to_string(),
        region.building_damage.severe.to_string(),
        format!("{:.1}", region.tsunami.height_m),
        format!("{:.1}", region.tsunami.arrival_min),
        region.casualties.deaths.to_string(),
        region.casualties.injuries().to_string(),
        percent(region.infrastructure_outage.electricity),
        percent(region.infrastructure_outage.water),
        format!("{:.1}", region.economic_loss.round_ties_even()),
    ]
}

fn detailed_row(region: &RegionResult) -> Vec<String> {
    let damage = &region.building_damage;
    let outage = &region.infrastructure_outage;
    vec![
        region.region_name.clone(),
        region.intensity.to_string(),
        damage.collapsed.to_string(),
        damage.severe.to_string(),
        damage.moderate.to_string(),
        damage.undamaged.to_string(),
        region.tsunami.height_m.to_string(),
        region.tsunami.arrival_min.to_string(),
        region.tsunami.inundation_fraction.to_string(),
        region.casualties.deaths.to_string(),
        region.casualties.serious_injuries.to_string(),
        region.casualties.minor_injuries.to_string(),
        outage.electricity.to_string(),
        outage.water.to_string(),
        outage.gas.to_string(),
        region.economic_loss.to_string(),
    ]
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

fn write_row<W: Write>(writer: &mut W, cells: impl IntoIterator<Item = String>) -> io::Result<()> {
    let line = cells
        .into_iter()
        .map(|cell| escape(&cell))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
