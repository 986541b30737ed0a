//! Worker pool and deadline-bounded shutdown.
//!
//! The coordinator spawns `worker_count` workers and races "all workers
//! finished" against the deadline. When the deadline wins it cancels every
//! worker and drains them for at most `shutdown_grace`; anything still
//! running after that is aborted, so no write loop outlives the pool.

use crate::error::{LoadError, WriteErrorKind};
use crate::metrics::{LoadMetrics, MetricsSnapshot};
use crate::service::TableService;
use crate::worker::{run_worker, ExitReason, WorkerContext, WorkerExit};
use chrono::{DateTime, Utc};
use dynamodb_types::KeySchema;
use loadtest_generator::ItemGenerator;
use loadtest_populate::{DEFAULT_DURATION_SECS, DEFAULT_SHUTDOWN_GRACE_SECS, DEFAULT_WORKERS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub worker_count: usize,
    pub deadline: Duration,
    pub shutdown_grace: Duration,
    /// Per-worker batch cap; `None` in normal runs
    pub max_batches: Option<u64>,
    /// Base seed for the worker generators; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKERS,
            deadline: Duration::from_secs(DEFAULT_DURATION_SECS),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
            max_batches: None,
            seed: None,
        }
    }
}

impl PoolConfig {
    pub fn new(worker_count: usize, deadline: Duration) -> Self {
        Self {
            worker_count,
            deadline,
            ..Default::default()
        }
    }

    pub fn with_shutdown_grace(mut self, shutdown_grace: Duration) -> Self {
        self.shutdown_grace = shutdown_grace;
        self
    }

    pub fn with_max_batches(mut self, max_batches: u64) -> Self {
        self.max_batches = Some(max_batches);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.worker_count == 0 {
            return Err(LoadError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the coordinator's wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolOutcome {
    /// Every worker terminated before the deadline
    Completed,
    /// The deadline elapsed first
    TimedOut,
}

/// How a joined worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Completed,
    Cancelled,
    Failed,
}

impl From<&ExitReason> for WorkerStatus {
    fn from(reason: &ExitReason) -> Self {
        match reason {
            ExitReason::Completed => WorkerStatus::Completed,
            ExitReason::Cancelled => WorkerStatus::Cancelled,
            ExitReason::Failed(_) => WorkerStatus::Failed,
        }
    }
}

/// Per-worker line of a pool report.
///
/// Aborted workers never join, so they have no line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub batches_written: u64,
    pub status: WorkerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<WriteErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&WorkerExit> for WorkerSummary {
    fn from(exit: &WorkerExit) -> Self {
        Self {
            worker_id: exit.worker_id,
            batches_written: exit.batches_written,
            status: WorkerStatus::from(&exit.reason),
            error_kind: exit.error().and_then(LoadError::write_kind),
            error: exit.error().map(ToString::to_string),
        }
    }
}

/// Result of a pool run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolReport {
    pub table_name: String,
    pub outcome: PoolOutcome,
    pub worker_count: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Wall-clock time until the pool returned, in milliseconds
    pub duration_ms: u64,
    pub metrics: MetricsSnapshot,
    pub items_per_second: f64,
    /// Workers that had to be aborted after the shutdown grace period
    pub aborted_workers: usize,
    /// Workers in the order they terminated
    pub workers: Vec<WorkerSummary>,
}

impl PoolReport {
    pub fn timed_out(&self) -> bool {
        self.outcome == PoolOutcome::TimedOut
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Run `config.worker_count` workers against `table_name` until they all
/// stop or the deadline elapses.
pub async fn run_pool(
    service: Arc<dyn TableService>,
    table_name: &str,
    schema: Arc<KeySchema>,
    config: &PoolConfig,
) -> Result<PoolReport, LoadError> {
    config.validate()?;

    let started_at = Utc::now();
    let start = Instant::now();
    let table: Arc<str> = Arc::from(table_name);
    let cancel = CancellationToken::new();
    let metrics = Arc::new(LoadMetrics::new());

    let mut workers = JoinSet::new();
    for worker_id in 1..=config.worker_count {
        workers.spawn(run_worker(WorkerContext {
            worker_id,
            table_name: table.clone(),
            service: service.clone(),
            generator: ItemGenerator::for_worker(schema.clone(), worker_id, config.seed),
            cancel: cancel.clone(),
            metrics: metrics.clone(),
            max_batches: config.max_batches,
        }));
    }

    info!(
        "Waiting for {} workers (up to {:?})",
        config.worker_count, config.deadline
    );

    let mut summaries = Vec::with_capacity(config.worker_count);
    let outcome = match tokio::time::timeout(
        config.deadline,
        join_workers(&mut workers, &mut summaries),
    )
    .await
    {
        Ok(()) => PoolOutcome::Completed,
        Err(_) => PoolOutcome::TimedOut,
    };

    let mut aborted_workers = 0;
    match outcome {
        PoolOutcome::Completed => info!("Done: all workers finished"),
        PoolOutcome::TimedOut => {
            warn!("Timeout elapsed after {:?}, stopping workers", config.deadline);
            cancel.cancel();
            let drained = tokio::time::timeout(
                config.shutdown_grace,
                join_workers(&mut workers, &mut summaries),
            )
            .await;
            if drained.is_err() {
                aborted_workers = workers.len();
                warn!(
                    "{} workers still running after {:?}, aborting",
                    aborted_workers, config.shutdown_grace
                );
                workers.shutdown().await;
            }
        }
    }

    let elapsed = start.elapsed();
    let snapshot = metrics.snapshot();
    let items_per_second = snapshot.items_per_second(elapsed);
    info!(
        "Wrote {} items in {} batches over {:.2}s ({:.2} items/sec)",
        snapshot.items_written,
        snapshot.batches_written,
        elapsed.as_secs_f64(),
        items_per_second
    );

    Ok(PoolReport {
        table_name: table_name.to_string(),
        outcome,
        worker_count: config.worker_count,
        started_at,
        completed_at: Utc::now(),
        duration_ms: elapsed.as_millis() as u64,
        metrics: snapshot,
        items_per_second,
        aborted_workers,
        workers: summaries,
    })
}

/// Join workers until the set is empty, recording each exit.
///
/// Cancel-safe: exits collected before the future is dropped are kept.
async fn join_workers(workers: &mut JoinSet<WorkerExit>, summaries: &mut Vec<WorkerSummary>) {
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(exit) => summaries.push(WorkerSummary::from(&exit)),
            Err(e) => error!("Worker task panicked: {}", e),
        }
    }
}
