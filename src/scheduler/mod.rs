// ABOUTME: Background notification scheduler for expiring-pantry reminders and weekly digests
// ABOUTME: Owned service with explicit start/stop; one tokio task per job kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Notification Scheduler
//!
//! [`NotificationScheduler`] owns its dependencies and its tasks. `start`
//! spawns one task per [`JobKind`]; each ticks on its own interval and runs
//! the job for every user known to the store. `stop` signals every task
//! through its shutdown channel and waits for it to finish.
//!
//! A failure for one user is logged and counted; the remaining users are
//! still processed.

mod generator;

pub use generator::{LlmNotificationGenerator, Notification, NotificationGenerator};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use foodlog_intelligence::items_expiring_within;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::environment::MAX_JOB_INTERVAL_SECS;
use crate::config::SchedulerConfig;
use crate::constants::collections;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::resources::ServerResources;

/// How far back the weekly digest looks
const DIGEST_WINDOW_DAYS: i64 = 7;

/// Most meals fed into one digest prompt
const MAX_DIGEST_MEALS: usize = 50;

/// Background job kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Remind users about pantry items close to their best-before date
    ExpiringPantry,
    /// Summarize the meals a user logged over the past week
    WeeklyDigest,
}

impl JobKind {
    /// Every job kind
    pub const ALL: [Self; 2] = [Self::ExpiringPantry, Self::WeeklyDigest];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpiringPantry => "expiring_pantry",
            Self::WeeklyDigest => "weekly_digest",
        }
    }

    /// Title used when the generator does not supply one
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::ExpiringPantry => "Use these soon",
            Self::WeeklyDigest => "Your week in food",
        }
    }

    /// Tick interval of this job
    #[must_use]
    pub const fn interval(self, config: &SchedulerConfig) -> Duration {
        match self {
            Self::ExpiringPantry => config.expiring_pantry_interval,
            Self::WeeklyDigest => config.weekly_digest_interval,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler lifecycle errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `start` was called on a running scheduler
    #[error("Notification scheduler is already running")]
    AlreadyRunning,
    /// A job interval is zero or too long to schedule
    #[error("Interval of job '{kind}' must be between 1s and {MAX_JOB_INTERVAL_SECS}s, got {secs}s")]
    InvalidInterval {
        /// Job with the bad interval
        kind: JobKind,
        /// Configured interval in seconds
        secs: u64,
    },
}

impl From<SchedulerError> for AppError {
    fn from(error: SchedulerError) -> Self {
        match error {
            SchedulerError::AlreadyRunning => {
                Self::new(ErrorCode::ResourceAlreadyExists, error.to_string())
            }
            SchedulerError::InvalidInterval { .. } => {
                Self::new(ErrorCode::InvalidInput, error.to_string())
            }
        }
    }
}

/// Outcome of one pass of a job over every user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRunSummary {
    /// Job that ran
    pub kind: JobKind,
    /// Users visited
    pub users_processed: usize,
    /// Notifications stored
    pub notifications_created: usize,
    /// Users with nothing to notify about
    pub skipped: usize,
    /// Users whose run failed
    pub failed: usize,
}

impl JobRunSummary {
    const fn new(kind: JobKind) -> Self {
        Self {
            kind,
            users_processed: 0,
            notifications_created: 0,
            skipped: 0,
            failed: 0,
        }
    }
}

/// Everything a job needs, cloned into each spawned task
#[derive(Clone)]
struct JobRunner {
    resources: Arc<ServerResources>,
    generator: Arc<dyn NotificationGenerator>,
    expiring_within_days: i64,
}

impl JobRunner {
    async fn run(&self, kind: JobKind) -> AppResult<JobRunSummary> {
        let users = self.resources.store.list_user_ids().await?;
        let today = Utc::now().date_naive();
        let mut summary = JobRunSummary::new(kind);

        for user_id in users {
            summary.users_processed += 1;
            match self.run_for_user(kind, user_id, today).await {
                Ok(true) => summary.notifications_created += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    warn!(job = %kind, %user_id, error = %e, "Notification job failed for user");
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Returns whether a notification was stored
    async fn run_for_user(
        &self,
        kind: JobKind,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<bool> {
        let store = &self.resources.store;
        let notification = match kind {
            JobKind::ExpiringPantry => {
                let pantry = store.get_pantry(user_id).await?;
                let expiring: Vec<_> =
                    items_expiring_within(&pantry, today, self.expiring_within_days)
                        .into_iter()
                        .cloned()
                        .collect();
                if expiring.is_empty() {
                    return Ok(false);
                }
                self.generator.expiring_pantry(&expiring, today).await?
            }
            JobKind::WeeklyDigest => {
                let meals = recent_meals(
                    store
                        .list_documents(user_id, collections::MEALS, MAX_DIGEST_MEALS)
                        .await?,
                    Utc::now(),
                );
                if meals.is_empty() {
                    return Ok(false);
                }
                self.generator.weekly_digest(&meals).await?
            }
        };

        let Some(notification) = notification else {
            debug!(job = %kind, %user_id, "Generator had nothing to say");
            return Ok(false);
        };
        let document = json!({
            "kind": notification.kind,
            "title": notification.title,
            "body": notification.body,
            "read": false,
        });
        store
            .append_document(user_id, collections::NOTIFICATIONS, document)
            .await?;
        Ok(true)
    }
}

/// Meals created within the digest window; undated meals are dropped
fn recent_meals(meals: Vec<Value>, now: DateTime<Utc>) -> Vec<Value> {
    let cutoff = now - ChronoDuration::days(DIGEST_WINDOW_DAYS);
    meals
        .into_iter()
        .filter(|meal| {
            meal.get("created_at")
                .and_then(Value::as_str)
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .is_some_and(|created| created.with_timezone(&Utc) >= cutoff)
        })
        .collect()
}

struct RunningJob {
    kind: JobKind,
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Owned scheduler service
pub struct NotificationScheduler {
    runner: JobRunner,
    config: SchedulerConfig,
    running: Mutex<Vec<RunningJob>>,
}

impl NotificationScheduler {
    /// Create a stopped scheduler
    #[must_use]
    pub fn new(
        resources: Arc<ServerResources>,
        generator: Arc<dyn NotificationGenerator>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            runner: JobRunner {
                resources,
                generator,
                expiring_within_days: config.expiring_within_days,
            },
            config,
            running: Mutex::new(Vec::new()),
        }
    }

    /// Spawn one task per job kind. The first run happens one interval after start.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the scheduler is already running
    pub async fn start(&self) -> AppResult<()> {
        let mut running = self.running.lock().await;
        if !running.is_empty() {
            return Err(SchedulerError::AlreadyRunning.into());
        }

        // Validate every job before spawning any
        let now = Instant::now();
        let mut schedule = Vec::with_capacity(JobKind::ALL.len());
        for kind in JobKind::ALL {
            let period = kind.interval(&self.config);
            let schedulable =
                !period.is_zero() && period <= Duration::from_secs(MAX_JOB_INTERVAL_SECS);
            let first_tick = now
                .checked_add(period)
                .filter(|_| schedulable)
                .ok_or(SchedulerError::InvalidInterval {
                    kind,
                    secs: period.as_secs(),
                })?;
            schedule.push((kind, period, first_tick));
        }

        for (kind, period, first_tick) in schedule {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let runner = self.runner.clone();

            let handle = tokio::spawn(async move {
                let mut ticker = interval_at(first_tick, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        biased;
                        _ = shutdown_rx.recv() => {
                            debug!(job = %kind, "Scheduler task received shutdown signal");
                            break;
                        }
                        _ = ticker.tick() => {
                            match runner.run(kind).await {
                                Ok(summary) => info!(
                                    job = %kind,
                                    users = summary.users_processed,
                                    created = summary.notifications_created,
                                    failed = summary.failed,
                                    "Notification job finished"
                                ),
                                Err(e) => error!(job = %kind, error = %e, "Notification job failed"),
                            }
                        }
                    }
                }
            });

            info!(job = %kind, interval_secs = period.as_secs(), "Scheduled notification job");
            running.push(RunningJob {
                kind,
                shutdown_tx,
                handle,
            });
        }
        drop(running);

        info!("Notification scheduler started");
        Ok(())
    }

    /// Signal every task and wait for it to exit. Stopping a stopped scheduler is a no-op.
    pub async fn stop(&self) {
        let jobs: Vec<RunningJob> = self.running.lock().await.drain(..).collect();
        if jobs.is_empty() {
            return;
        }

        for job in jobs {
            // A closed channel means the task already exited
            let _ = job.shutdown_tx.send(()).await;
            if let Err(e) = job.handle.await {
                error!(job = %job.kind, error = %e, "Scheduler task ended abnormally");
            }
        }
        info!("Notification scheduler stopped");
    }

    /// Whether the background tasks are running
    pub async fn is_running(&self) -> bool {
        !self.running.lock().await.is_empty()
    }

    /// Run one pass of `kind` over every user and wait for it
    ///
    /// # Errors
    ///
    /// Returns an error only when the user list cannot be read; per-user
    /// failures are counted in the summary
    pub async fn run_job_once(&self, kind: JobKind) -> AppResult<JobRunSummary> {
        self.runner.run(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_meals_drops_old_and_undated() {
        let now = Utc::now();
        let fresh = json!({"created_at": (now - ChronoDuration::days(1)).to_rfc3339()});
        let stale = json!({"created_at": (now - ChronoDuration::days(10)).to_rfc3339()});
        let undated = json!({"ingredients": ["rice"]});
        let kept = recent_meals(vec![fresh.clone(), stale, undated], now);
        assert_eq!(kept, vec![fresh]);
    }
}
