//! A single write-load worker.
//!
//! Each worker owns its generator and loops build → write until the first
//! error, cancellation, or its optional batch cap.

use crate::error::LoadError;
use crate::metrics::LoadMetrics;
use crate::service::TableService;
use crate::write::execute_batch;
use loadtest_generator::{ItemGenerator, BATCH_WRITE_SIZE};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Everything a worker needs, moved into its task at spawn time.
pub struct WorkerContext {
    pub worker_id: usize,
    pub table_name: Arc<str>,
    pub service: Arc<dyn TableService>,
    pub generator: ItemGenerator,
    pub cancel: CancellationToken,
    pub metrics: Arc<LoadMetrics>,
    /// Stop after this many batches; `None` runs until error or cancellation
    pub max_batches: Option<u64>,
}

/// Why a worker left its loop.
#[derive(Debug, Clone)]
pub enum ExitReason {
    /// Reached its batch cap
    Completed,
    /// Observed the cancellation signal
    Cancelled,
    /// Stopped by a synthesis or write error
    Failed(LoadError),
}

/// Final state of a worker.
#[derive(Debug, Clone)]
pub struct WorkerExit {
    pub worker_id: usize,
    pub batches_written: u64,
    pub reason: ExitReason,
}

impl WorkerExit {
    pub fn error(&self) -> Option<&LoadError> {
        match &self.reason {
            ExitReason::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Run the worker loop to termination.
pub async fn run_worker(mut ctx: WorkerContext) -> WorkerExit {
    info!("Worker {} starting", ctx.worker_id);
    ctx.metrics.record_worker_started();

    let mut batches_written = 0u64;
    let reason = loop {
        if ctx.cancel.is_cancelled() {
            break ExitReason::Cancelled;
        }
        if ctx.max_batches.is_some_and(|max| batches_written >= max) {
            break ExitReason::Completed;
        }

        let batch = match ctx.generator.next_batch(BATCH_WRITE_SIZE) {
            Ok(batch) => batch,
            Err(e) => break ExitReason::Failed(e.into()),
        };
        let items = batch.len() as u64;
        let bytes: u64 = batch.iter().map(|item| item.size_bytes() as u64).sum();

        match execute_batch(ctx.service.as_ref(), &ctx.table_name, batch).await {
            Ok(ack) => {
                batches_written += 1;
                ctx.metrics
                    .record_batch(items, bytes, ack.unprocessed_items as u64);
                debug!("Worker {} wrote batch {}", ctx.worker_id, batches_written);
            }
            Err(e) => break ExitReason::Failed(e.into()),
        }

        // Writes that complete without suspending would otherwise starve
        // the coordinator's deadline timer.
        tokio::task::yield_now().await;
    };

    match &reason {
        ExitReason::Failed(err) => {
            ctx.metrics.record_worker_failed();
            error!(
                "Worker {} stopped after {} batches: {}",
                ctx.worker_id, batches_written, err
            );
        }
        ExitReason::Cancelled => {
            info!(
                "Worker {} cancelled after {} batches",
                ctx.worker_id, batches_written
            );
        }
        ExitReason::Completed => {
            info!(
                "Worker {} completed {} batches",
                ctx.worker_id, batches_written
            );
        }
    }

    WorkerExit {
        worker_id: ctx.worker_id,
        batches_written,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WriteErrorKind;
    use crate::testing::MockTableService;
    use dynamodb_types::{KeyAttributeType, KeySchema, TableDescription};

    fn context(service: Arc<MockTableService>, schema: KeySchema) -> WorkerContext {
        WorkerContext {
            worker_id: 1,
            table_name: Arc::from("events"),
            service,
            generator: ItemGenerator::new(Arc::new(schema), 42),
            cancel: CancellationToken::new(),
            metrics: Arc::new(LoadMetrics::new()),
            max_batches: None,
        }
    }

    fn string_schema() -> KeySchema {
        KeySchema::partition_only("id", KeyAttributeType::String)
    }

    fn description() -> TableDescription {
        TableDescription::new()
            .with_key("id", "HASH")
            .with_attribute("id", "S")
    }

    #[tokio::test]
    async fn test_stops_on_nth_write_failure() {
        let service = Arc::new(MockTableService::new(description()).fail_on_write(
            5,
            Some("ProvisionedThroughputExceededException"),
            "Rate exceeded",
        ));
        let ctx = context(service.clone(), string_schema());
        let metrics = ctx.metrics.clone();

        let exit = run_worker(ctx).await;

        assert_eq!(service.write_calls(), 5);
        assert_eq!(exit.batches_written, 4);
        assert_eq!(
            exit.error().and_then(LoadError::write_kind),
            Some(WriteErrorKind::ThroughputExceeded)
        );
        assert_eq!(metrics.snapshot().items_written, 4 * BATCH_WRITE_SIZE as u64);
        assert_eq!(metrics.snapshot().failed_workers, 1);
    }

    #[tokio::test]
    async fn test_stops_at_batch_cap() {
        let service = Arc::new(MockTableService::new(description()));
        let mut ctx = context(service.clone(), string_schema());
        ctx.max_batches = Some(3);

        let exit = run_worker(ctx).await;

        assert!(matches!(exit.reason, ExitReason::Completed));
        assert_eq!(exit.batches_written, 3);
        assert_eq!(service.write_calls(), 3);
        assert_eq!(service.items_received(), 75);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_batch() {
        let service = Arc::new(MockTableService::new(description()));
        let ctx = context(service.clone(), string_schema());
        ctx.cancel.cancel();

        let exit = run_worker(ctx).await;

        assert!(matches!(exit.reason, ExitReason::Cancelled));
        assert_eq!(service.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_synthesis_failure_never_writes() {
        let service = Arc::new(MockTableService::new(description()));
        let ctx = context(
            service.clone(),
            KeySchema::partition_only("id", KeyAttributeType::Unsupported("BOOL".to_string())),
        );

        let exit = run_worker(ctx).await;

        assert!(matches!(exit.error(), Some(LoadError::Synthesis(_))));
        assert_eq!(service.write_calls(), 0);
    }
}
