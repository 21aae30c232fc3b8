// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduler host and liveness surface for the Advance Tax maintenance
//! service.
//!
//! Wires the persistence layer to the two maintenance jobs, runs the
//! provisioning job once at startup, registers both jobs with the cron
//! orchestrator, and serves a small HTTP surface reporting scheduler
//! health. No user-facing API lives here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod scheduler;

use advtax_jobs::{RunStatus, provision_for_all_clients, transition_quarters_to_current_state};
use advtax_persistence::Persistence;
use axum::{
    Json, Router,
    extract::State as AxumState,
    routing::get,
};
use clap::Parser;
use scheduler::{JobOrchestrator, JobOutcome, ScheduledJobInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Stable registration id of the provisioning job.
const PROVISIONING_JOB_ID: &str = "financial_year_provisioning";
/// Human name of the provisioning job.
const PROVISIONING_JOB_NAME: &str = "Financial Year Provisioning Job";
/// Stable registration id of the quarter transition job.
const TRANSITION_JOB_ID: &str = "quarter_transition";
/// Human name of the quarter transition job.
const TRANSITION_JOB_NAME: &str = "Quarter Transition Job";

/// Advance Tax maintenance service - financial year and quarter jobs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL/MariaDB connection URL. Takes precedence over --database.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the liveness server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Cron trigger for the provisioning job (seconds-resolution, UTC).
    /// Default: hourly on the hour.
    #[arg(long, default_value = "0 0 * * * *")]
    provision_cron: String,

    /// Cron trigger for the quarter transition job. Default: daily at
    /// 00:05, shortly after the provisioning job's midnight tick.
    #[arg(long, default_value = "0 5 0 * * *")]
    transition_cron: String,

    /// Skip the provisioning run normally performed once at startup.
    #[arg(long, default_value_t = false)]
    skip_startup_provision: bool,
}

/// Application state shared across handlers.
///
/// The persistence handle lives inside the job closures; the liveness
/// endpoints only report on the orchestrator.
#[derive(Clone)]
struct AppState {
    /// The job orchestrator, for health reporting.
    orchestrator: Arc<JobOrchestrator>,
}

/// Response body for the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceInfoResponse {
    /// Service name.
    service: String,
    /// Liveness indicator.
    status: String,
    /// What this service does.
    description: String,
    /// Registered maintenance jobs.
    cron_jobs: Vec<ScheduledJobInfo>,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Overall health indicator.
    status: String,
    /// Whether the scheduler has been started.
    scheduler_running: bool,
    /// Registered jobs with their next fire times.
    scheduled_jobs: Vec<ScheduledJobInfo>,
}

/// Runs the provisioning job against today's date.
///
/// Per-client failures are carried in the summary; only the gap scan can
/// fail the run outright. Either way the failure is logged here and the
/// process keeps running.
async fn run_provisioning_job(persistence: Arc<Mutex<Persistence>>) -> JobOutcome {
    let today = OffsetDateTime::now_utc().date();
    let mut persistence = persistence.lock().await;
    match provision_for_all_clients(&mut persistence, today) {
        Ok(summary) => {
            info!(
                label = %summary.label,
                clients_processed = summary.clients_processed,
                financial_years_created = summary.financial_years_created,
                quarters_created = summary.quarters_created,
                "Provisioning summary"
            );
            if summary.status == RunStatus::Partial {
                warn!(
                    failed_count = summary.failed_count,
                    failed_client_ids = ?summary.failed_client_ids,
                    "Some clients could not be provisioned"
                );
                JobOutcome::Failed
            } else {
                JobOutcome::Succeeded
            }
        }
        Err(e) => {
            error!(error = %e, "Provisioning run failed");
            JobOutcome::Failed
        }
    }
}

/// Runs the quarter transition job against today's date.
async fn run_transition_job(persistence: Arc<Mutex<Persistence>>) -> JobOutcome {
    let today = OffsetDateTime::now_utc().date();
    let mut persistence = persistence.lock().await;
    match transition_quarters_to_current_state(&mut persistence, today) {
        Ok(report) => {
            info!(
                current = %report.current,
                previous = %report.previous,
                current_quarters_updated = report.counts.current_quarters_updated,
                previous_quarters_updated = report.counts.previous_quarters_updated,
                "Quarter transition summary"
            );
            JobOutcome::Succeeded
        }
        Err(e) => {
            error!(
                current = %e.current,
                previous = %e.previous,
                error = %e.cause,
                "Quarter transition failed"
            );
            JobOutcome::Failed
        }
    }
}

/// Handler for the root endpoint: a human-oriented service summary.
async fn handle_root(AxumState(app_state): AxumState<AppState>) -> Json<ServiceInfoResponse> {
    let cron_jobs = app_state.orchestrator.jobs().await;
    Json(ServiceInfoResponse {
        service: String::from("Advance Tax Maintenance Service"),
        status: String::from("running"),
        description: String::from(
            "Automated financial year provisioning and quarter lifecycle transitions",
        ),
        cron_jobs,
    })
}

/// Handler for the health endpoint: scheduler state and registered jobs.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    let scheduler_running = app_state.orchestrator.is_running();
    let scheduled_jobs = app_state.orchestrator.jobs().await;
    Json(HealthResponse {
        status: String::from("healthy"),
        scheduler_running,
        scheduled_jobs,
    })
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

/// Opens the configured database backend.
fn open_persistence(args: &Args) -> Result<Persistence, advtax_persistence::PersistenceError> {
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(url)
    } else if let Some(path) = &args.database {
        info!("Using file-based database at: {}", path);
        Persistence::new_with_file(path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Advance Tax maintenance service");

    let persistence = Arc::new(Mutex::new(open_persistence(&args)?));

    // The roster may have grown while the service was down; cover it before
    // the first scheduled tick.
    if args.skip_startup_provision {
        info!("Skipping startup provisioning run");
    } else {
        info!("Running initial provisioning job");
        run_provisioning_job(Arc::clone(&persistence)).await;
    }

    // Job registration failure is fatal: a process that cannot schedule its
    // jobs has nothing to do.
    let mut orchestrator = JobOrchestrator::new().await?;
    {
        let persistence = Arc::clone(&persistence);
        orchestrator
            .register(
                PROVISIONING_JOB_ID,
                PROVISIONING_JOB_NAME,
                &args.provision_cron,
                move || run_provisioning_job(Arc::clone(&persistence)),
            )
            .await?;
    }
    {
        let persistence = Arc::clone(&persistence);
        orchestrator
            .register(
                TRANSITION_JOB_ID,
                TRANSITION_JOB_NAME,
                &args.transition_cron,
                move || run_transition_job(Arc::clone(&persistence)),
            )
            .await?;
    }
    orchestrator.start().await?;

    let app_state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
