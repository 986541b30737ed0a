//! In-process `TableService` for tests.

use crate::service::{BatchWriteAck, ServiceError, TableService};
use async_trait::async_trait;
use dynamodb_types::{Item, TableDescription};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Scripted table service.
///
/// Describe returns a fixed description (or a fixed error). Batch writes
/// succeed until the configured failing call number, from which point
/// every write fails with the configured error.
#[derive(Debug, Default)]
pub struct MockTableService {
    description: Option<TableDescription>,
    describe_error: Option<ServiceError>,
    fail_on_write: Option<(u64, ServiceError)>,
    write_delay: Option<Duration>,
    unprocessed_per_write: usize,
    describe_calls: AtomicU64,
    write_calls: AtomicU64,
    items_received: AtomicU64,
}

impl MockTableService {
    /// Service describing the table as `description`; writes always succeed.
    pub fn new(description: TableDescription) -> Self {
        Self {
            description: Some(description),
            ..Default::default()
        }
    }

    /// Service whose describe call fails.
    pub fn failing_describe(code: Option<&str>, message: &str) -> Self {
        Self {
            describe_error: Some(ServiceError::new(code, message)),
            ..Default::default()
        }
    }

    /// Fail the `call`-th write (1-based) and every write after it.
    pub fn fail_on_write(mut self, call: u64, code: Option<&str>, message: &str) -> Self {
        self.fail_on_write = Some((call, ServiceError::new(code, message)));
        self
    }

    /// Sleep this long inside every write.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Report this many unprocessed items on every successful write.
    pub fn with_unprocessed(mut self, count: usize) -> Self {
        self.unprocessed_per_write = count;
        self
    }

    pub fn describe_calls(&self) -> u64 {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn items_received(&self) -> u64 {
        self.items_received.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableService for MockTableService {
    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, ServiceError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.describe_error {
            return Err(err.clone());
        }
        self.description.clone().ok_or_else(|| {
            ServiceError::new(
                Some("ResourceNotFoundException"),
                format!("Table {table_name} not found"),
            )
        })
    }

    async fn batch_write(
        &self,
        _table_name: &str,
        items: Vec<Item>,
    ) -> Result<BatchWriteAck, ServiceError> {
        let call = self.write_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((failing_call, err)) = &self.fail_on_write {
            if call >= *failing_call {
                return Err(err.clone());
            }
        }
        self.items_received
            .fetch_add(items.len() as u64, Ordering::SeqCst);
        Ok(BatchWriteAck {
            unprocessed_items: self.unprocessed_per_write,
        })
    }
}
