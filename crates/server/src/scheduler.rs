// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job orchestration on top of `tokio_cron_scheduler`.
//!
//! The underlying scheduler identifies jobs by generated UUID; this wrapper
//! adds the registration contract the maintenance jobs rely on:
//!
//! - jobs are registered under a **stable string id** and human name
//! - re-registering an id replaces the prior registration
//! - at most one instance of a job runs at a time — a tick that fires while
//!   the previous run is still executing is skipped, not queued
//! - registered jobs and their next fire times can be listed for the
//!   health surface

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Outcome of one job run, reported by the job body.
///
/// The orchestrator owns the closing log line; job bodies log their own
/// detail (summaries, failed ids) and reduce to this for the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The run completed with nothing left behind.
    Succeeded,
    /// The run failed or left work behind; details were already logged.
    Failed,
}

/// A registered job as reported by the health surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJobInfo {
    /// Stable registration id.
    pub id: String,
    /// Human-readable job name.
    pub name: String,
    /// Next scheduled fire time (RFC 3339), if the scheduler knows one.
    pub next_run: Option<String>,
}

/// One registration held by the orchestrator.
struct RegisteredJob {
    id: &'static str,
    name: &'static str,
    uuid: Uuid,
}

/// Owns the cron scheduler and the registration table.
///
/// Construct, register jobs, then share behind an `Arc`; registration
/// needs `&mut self` and happens only during startup.
pub struct JobOrchestrator {
    scheduler: JobScheduler,
    jobs: Vec<RegisteredJob>,
    started: AtomicBool,
}

impl JobOrchestrator {
    /// Creates an orchestrator with an empty registration table.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scheduler cannot be created.
    pub async fn new() -> Result<Self, JobSchedulerError> {
        Ok(Self {
            scheduler: JobScheduler::new().await?,
            jobs: Vec::new(),
            started: AtomicBool::new(false),
        })
    }

    /// Registers a job under a stable id.
    ///
    /// If a job with the same id is already registered it is removed first,
    /// so re-registration replaces the prior trigger. The body future is
    /// invoked on each cron tick unless the previous run of the same job is
    /// still executing, in which case the tick is skipped.
    ///
    /// # Arguments
    ///
    /// * `id` - Stable registration id (e.g. `quarter_transition`)
    /// * `name` - Human-readable name for logs and the health surface
    /// * `cron` - Seconds-resolution cron expression (UTC)
    /// * `body` - The job body; returns the outcome for the closing banner
    ///
    /// # Errors
    ///
    /// Returns an error if the cron expression is invalid or the scheduler
    /// rejects the job.
    pub async fn register<F, Fut>(
        &mut self,
        id: &'static str,
        name: &'static str,
        cron: &str,
        body: F,
    ) -> Result<(), JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = JobOutcome> + Send + 'static,
    {
        if let Some(position) = self.jobs.iter().position(|job| job.id == id) {
            let old = self.jobs.remove(position);
            let mut scheduler = self.scheduler.clone();
            scheduler.remove(&old.uuid).await?;
            info!(job = id, "Replaced existing job registration");
        }

        let busy = Arc::new(Mutex::new(()));
        let job = Job::new_async(cron, move |_uuid, _scheduler| {
            let busy = Arc::clone(&busy);
            let body = body.clone();
            Box::pin(async move {
                // At most one concurrent run per job id.
                let Ok(_running) = busy.try_lock() else {
                    warn!(job = id, "Previous run still in progress, skipping this tick");
                    return;
                };
                info!(job = name, "Job starting");
                match body().await {
                    JobOutcome::Succeeded => info!(job = name, "Job completed successfully"),
                    JobOutcome::Failed => error!(job = name, "Job failed"),
                }
            })
        })?;

        let mut scheduler = self.scheduler.clone();
        let uuid = scheduler.add(job).await?;
        self.jobs.push(RegisteredJob { id, name, uuid });
        info!(job = id, name, cron, "Registered job");
        Ok(())
    }

    /// Starts firing registered jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scheduler fails to start.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.start().await?;
        self.started.store(true, Ordering::SeqCst);
        info!("Scheduler started");
        Ok(())
    }

    /// Stops the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scheduler fails to shut down.
    pub async fn shutdown(&self) -> Result<(), JobSchedulerError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;
        self.started.store(false, Ordering::SeqCst);
        info!("Scheduler stopped");
        Ok(())
    }

    /// Whether `start` has been called (and `shutdown` has not).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Lists registered jobs with their next scheduled fire times.
    pub async fn jobs(&self) -> Vec<ScheduledJobInfo> {
        let mut out = Vec::with_capacity(self.jobs.len());
        for job in &self.jobs {
            let mut scheduler = self.scheduler.clone();
            let next_run = scheduler
                .next_tick_for_job(job.uuid)
                .await
                .ok()
                .flatten()
                .map(|tick| tick.to_rfc3339());
            out.push(ScheduledJobInfo {
                id: job.id.to_string(),
                name: job.name.to_string(),
                next_run,
            });
        }
        out
    }
}
