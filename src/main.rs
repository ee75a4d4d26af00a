use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use nankai_sim::{
    config::AppConfig,
    params::EarthquakeParameters,
    report::{dashboard_row, write_csv, CsvLayout, CsvOptions, SimulationReport, DASHBOARD_HEADERS},
    simulation::{simulate, SimulationResult},
    telemetry,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Nankai Trough earthquake damage estimator")]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one simulation and print or write the result table
    Run(RunArgs),
    /// Serve the browser dashboard
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Moment magnitude (7.0–9.0)
    #[arg(long)]
    magnitude: Option<f64>,

    /// Source depth in km (5–50)
    #[arg(long)]
    depth: Option<f64>,

    /// Epicenter latitude (30–36)
    #[arg(long)]
    lat: Option<f64>,

    /// Epicenter longitude (130–140)
    #[arg(long)]
    lon: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Use full-precision columns for CSV output
    #[arg(long)]
    detailed: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_yaml(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    telemetry::init(&config.logging.level)?;

    match cli.command {
        Command::Run(args) => run_once(&config, args),
        Command::Serve(args) => serve(config, args).await,
    }
}

fn run_once(config: &AppConfig, args: RunArgs) -> Result<()> {
    let base = config.earthquake;
    let earthquake = EarthquakeParameters::new(
        args.magnitude.unwrap_or(base.magnitude),
        args.depth.unwrap_or(base.depth_km),
        args.lat.unwrap_or(base.epicenter_lat),
        args.lon.unwrap_or(base.epicenter_lon),
    )?;
    let catalog = config.load_catalog()?;
    let result = simulate(&earthquake, &catalog);
    let summary = result.summary();
    info!(
        scenario = %config.name,
        regions = result.len(),
        deaths = summary.deaths,
        collapsed = summary.collapsed_buildings,
        "simulation complete"
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Table => print_table(&result, &mut out)?,
        OutputFormat::Json => {
            let report = SimulationReport::new(earthquake, result);
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let options = CsvOptions {
                layout: if args.detailed {
                    CsvLayout::Detailed
                } else {
                    CsvLayout::Dashboard
                },
                // Only files get a BOM; piping keeps plain UTF-8.
                bom: args.output.is_some(),
            };
            write_csv(&result, &mut out, options)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_table(result: &SimulationResult, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", DASHBOARD_HEADERS.join("\t"))?;
    for region in result {
        writeln!(out, "{}", dashboard_row(region).join("\t"))?;
    }
    let summary = result.summary();
    writeln!(
        out,
        "\n推定死者数 {}人 / 全壊建物 {}棟 / 負傷者数 {}人 / 経済被害 {:.0}億円",
        summary.deaths, summary.collapsed_buildings, summary.injuries, summary.economic_loss
    )?;
    Ok(())
}

async fn serve(config: AppConfig, args: ServeArgs) -> Result<()> {
    let catalog = config.load_catalog()?;
    config.earthquake.validate()?;
    web::run(WebServerConfig {
        catalog,
        defaults: config.earthquake,
        host: args.host.unwrap_or(config.server.host),
        port: args.port.unwrap_or(config.server.port),
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nankai-sim",
            "run",
            "--config",
            "scenarios/kii_channel.yaml",
            "--format",
            "csv",
            "--detailed",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("scenarios/kii_channel.yaml")));
        match cli.command {
            Command::Run(args) => {
                assert!(matches!(args.format, OutputFormat::Csv));
                assert!(args.detailed);
                assert!(args.magnitude.is_none());
            }
            Command::Serve(_) => panic!("expected run"),
        }
    }

    #[test]
    fn serve_port_must_be_a_number() {
        assert!(Cli::try_parse_from(["nankai-sim", "serve", "--port", "http"]).is_err());
    }
}
