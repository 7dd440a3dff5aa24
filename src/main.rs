mod demo;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use demo::{demo_snapshot, render_kpi_rows, render_ledger, render_weekly, run_demo, DemoArgs};
use fleet_scp::config::AppConfig;
use fleet_scp::error::AppError;
use fleet_scp::scoring::{
    dashboard_band, scorecard_band, BalanceBand, InfractionDetail, KpiPeriod, KpiRow,
    LedgerPeriod, WeeklyTripSummary,
};
use fleet_scp::store::FleetSnapshot;
use fleet_scp::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    snapshot: Arc<FleetSnapshot>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Compliance Scoring",
    about = "Compute driver point ledgers and fleet KPI reports from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the point ledger for one driver
    Ledger(LedgerArgs),
    /// Compute the KPI report for a period
    Kpi(KpiArgs),
    /// Run the scoring demo on the built-in dataset
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Snapshot file served when requests carry none (overrides FLEET_SNAPSHOT)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LedgerArgs {
    /// Driver id to score
    #[arg(long)]
    driver: String,
    /// Restrict the ledger to one year (all periods when omitted)
    #[arg(long)]
    year: Option<i32>,
    /// Snapshot file (falls back to the built-in demo dataset)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct KpiArgs {
    /// Evaluation year
    #[arg(long)]
    year: i32,
    /// Evaluation month 1-12 (yearly report when omitted)
    #[arg(long)]
    month: Option<u32>,
    /// Also print weekly sub-totals
    #[arg(long)]
    weekly: bool,
    /// Snapshot file (falls back to the built-in demo dataset)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerRequest {
    driver_id: String,
    #[serde(default)]
    year: Option<i32>,
    /// Inline snapshot; the server-side snapshot is used when omitted.
    #[serde(default)]
    snapshot: Option<FleetSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerResponse {
    driver_id: String,
    year: Option<i32>,
    total_points_lost: i32,
    balance: i32,
    infraction_count: usize,
    dashboard_band: BalanceBand,
    dashboard_band_label: &'static str,
    scorecard_band: BalanceBand,
    scorecard_band_label: &'static str,
    details: Vec<InfractionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpiRequest {
    #[serde(flatten)]
    period: KpiPeriod,
    #[serde(default)]
    include_weekly: bool,
    #[serde(default)]
    snapshot: Option<FleetSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KpiResponse {
    period: KpiPeriod,
    partner_name: Option<String>,
    rows: Vec<KpiRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weekly: Option<Vec<WeeklyTripSummary>>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Ledger(args) => run_ledger(args),
        Command::Kpi(args) => run_kpi(args),
        Command::Demo(args) => run_demo(args),
    }
}

/// Snapshot selection shared by the CLI commands and serve mode: an explicit
/// file wins, otherwise the built-in demo dataset stands in for the store.
fn load_snapshot(path: Option<PathBuf>) -> Result<FleetSnapshot, AppError> {
    match path {
        Some(path) => FleetSnapshot::from_path(&path).map_err(AppError::from),
        None => Ok(demo_snapshot()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(snapshot) = args.snapshot.take() {
        config.store.snapshot_path = Some(snapshot);
    }

    telemetry::init(&config.telemetry)?;

    let snapshot = load_snapshot(config.store.snapshot_path.clone())?;
    info!(
        partners = snapshot.partners.len(),
        trip_reports = snapshot.trip_reports.len(),
        infractions = snapshot.infractions.len(),
        "snapshot loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        snapshot: Arc::new(snapshot),
    };

    let app = api_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fleet compliance scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/drivers/ledger", post(ledger_endpoint))
        .route("/api/v1/kpi/report", post(kpi_endpoint))
        .with_state(state)
}

fn run_ledger(args: LedgerArgs) -> Result<(), AppError> {
    let LedgerArgs {
        driver,
        year,
        snapshot,
    } = args;

    let snapshot = load_snapshot(snapshot)?;
    let period = year.map_or(LedgerPeriod::All, LedgerPeriod::Year);
    let ledger = snapshot.driver_ledger(&driver, period);

    let tables = snapshot.reference_tables();
    let label = tables.driver_full_name(&Some(driver));
    render_ledger(&label, &ledger);

    Ok(())
}

fn run_kpi(args: KpiArgs) -> Result<(), AppError> {
    let KpiArgs {
        year,
        month,
        weekly,
        snapshot,
    } = args;

    let snapshot = load_snapshot(snapshot)?;
    let period = match month {
        Some(month) => KpiPeriod::Monthly { year, month },
        None => KpiPeriod::Yearly { year },
    };

    render_kpi_rows(&snapshot.kpi_report(period));
    if weekly {
        println!();
        render_weekly(&snapshot.weekly_summaries(period));
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn ledger_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<LedgerRequest>,
) -> Json<LedgerResponse> {
    let LedgerRequest {
        driver_id,
        year,
        snapshot,
    } = payload;

    let period = year.map_or(LedgerPeriod::All, LedgerPeriod::Year);
    let ledger = match snapshot {
        Some(snapshot) => snapshot.driver_ledger(&driver_id, period),
        None => state.snapshot.driver_ledger(&driver_id, period),
    };

    Json(LedgerResponse {
        driver_id: ledger.driver_id.clone(),
        year,
        total_points_lost: ledger.total_points_lost,
        balance: ledger.balance,
        infraction_count: ledger.infraction_count,
        dashboard_band: dashboard_band(ledger.balance),
        dashboard_band_label: dashboard_band(ledger.balance).label(),
        scorecard_band: scorecard_band(ledger.balance),
        scorecard_band_label: scorecard_band(ledger.balance).label(),
        details: ledger.details,
    })
}

async fn kpi_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<KpiRequest>,
) -> Json<KpiResponse> {
    let KpiRequest {
        period,
        include_weekly,
        snapshot,
    } = payload;

    let snapshot = snapshot
        .map(Arc::new)
        .unwrap_or_else(|| state.snapshot.clone());

    let rows = snapshot.kpi_report(period);
    let weekly = include_weekly.then(|| snapshot.weekly_summaries(period));

    Json(KpiResponse {
        period,
        partner_name: snapshot.active_partner().map(|partner| partner.name.clone()),
        rows,
        weekly,
    })
}
