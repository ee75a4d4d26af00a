use std::{net::SocketAddr, ops::RangeInclusive, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    catalog::{RegionCatalog, RegionRecord},
    params::{
        EarthquakeParameters, ParameterError, DEPTH_KM_RANGE, LATITUDE_RANGE, LONGITUDE_RANGE,
        MAGNITUDE_RANGE,
    },
    report::{to_csv_string, CsvOptions, SimulationReport},
    simulation::simulate,
};

const INDEX_HTML: &str = include_str!("assets/index.html");
const STYLES_CSS: &str = include_str!("assets/styles.css");
const APP_JS: &str = include_str!("assets/app.js");

pub const CSV_FILE_NAME: &str = "earthquake_simulation_results.csv";

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RegionCatalog>,
    defaults: EarthquakeParameters,
}

impl AppState {
    pub fn new(catalog: RegionCatalog, defaults: EarthquakeParameters) -> Self {
        Self {
            catalog: Arc::new(catalog),
            defaults,
        }
    }
}

pub struct WebServerConfig {
    pub catalog: RegionCatalog,
    pub defaults: EarthquakeParameters,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        catalog,
        defaults,
        host,
        port,
    } = config;

    let region_count = catalog.len();
    let router = router(AppState::new(catalog, defaults));

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, regions = region_count, "dashboard live at http://{addr} (Ctrl+C to stop)");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/regions", get(regions))
        .route("/api/defaults", get(defaults))
        .route("/api/simulate", post(run_simulation))
        .route("/api/simulate.csv", get(download_csv))
        .with_state(Arc::new(state))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {err}");
    }
    info!("shutting down dashboard");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn regions(State(state): State<Arc<AppState>>) -> Json<Vec<RegionRecord>> {
    Json(state.catalog.regions().to_vec())
}

#[derive(Serialize)]
struct FieldRange {
    min: f64,
    max: f64,
    step: f64,
}

impl FieldRange {
    fn new(range: &RangeInclusive<f64>, step: f64) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
            step,
        }
    }
}

#[derive(Serialize)]
struct ParameterRanges {
    magnitude: FieldRange,
    depth_km: FieldRange,
    epicenter_lat: FieldRange,
    epicenter_lon: FieldRange,
}

#[derive(Serialize)]
struct DefaultsResponse {
    defaults: EarthquakeParameters,
    ranges: ParameterRanges,
}

async fn defaults(State(state): State<Arc<AppState>>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        defaults: state.defaults,
        ranges: ParameterRanges {
            magnitude: FieldRange::new(&MAGNITUDE_RANGE, 0.1),
            depth_km: FieldRange::new(&DEPTH_KM_RANGE, 5.0),
            epicenter_lat: FieldRange::new(&LATITUDE_RANGE, 0.5),
            epicenter_lon: FieldRange::new(&LONGITUDE_RANGE, 0.5),
        },
    })
}

async fn run_simulation(
    State(state): State<Arc<AppState>>,
    Json(params): Json<EarthquakeParameters>,
) -> Result<Json<SimulationReport>, ApiError> {
    params.validate()?;
    let result = simulate(&params, &state.catalog);
    let report = SimulationReport::new(params, result);
    info!(
        magnitude = params.magnitude,
        deaths = report.summary.deaths,
        "simulation served"
    );
    Ok(Json(report))
}

async fn download_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EarthquakeParameters>,
) -> Result<Response, ApiError> {
    params.validate()?;
    let result = simulate(&params, &state.catalog);
    let body = to_csv_string(&result, CsvOptions::default());
    let disposition = format!("attachment; filename=\"{CSV_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
struct ApiError(ParameterError);

impl From<ParameterError> for ApiError {
    fn from(value: ParameterError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
