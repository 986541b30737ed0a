//! DynamoDB write-load populator.
//!
//! Discovers a table's key schema and drives concurrent, randomized
//! BatchWriteItem traffic against it for a bounded duration.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────────┐
//!                 │ discover_schema  │  DescribeTable (once)
//!                 └────────┬─────────┘
//!                          │ Arc<KeySchema>
//!                          ▼
//!                 ┌──────────────────┐
//!                 │     run_pool     │  deadline + CancellationToken
//!                 └────────┬─────────┘
//!          ┌───────────────┼───────────────┐
//!          ▼               ▼               ▼
//!    ┌──────────┐    ┌──────────┐    ┌──────────┐
//!    │ Worker 1 │    │ Worker 2 │    │ Worker N │
//!    └────┬─────┘    └────┬─────┘    └────┬─────┘
//!         │  ItemGenerator → 25-item batch → execute_batch
//!         ▼               ▼               ▼
//!    ┌─────────────────────────────────────────┐
//!    │        TableService (BatchWriteItem)     │
//!    └─────────────────────────────────────────┘
//! ```
//!
//! A worker stops at its first write error; the error is logged with its
//! classified kind and the other workers keep running. When the deadline
//! elapses the pool cancels all workers and waits for them to stop.

pub mod args;
pub mod discovery;
pub mod error;
pub mod metrics;
pub mod pool;
pub mod populator;
pub mod service;
pub mod testing;
pub mod worker;
pub mod write;

pub use args::DynamoDBPopulateArgs;
pub use discovery::discover_schema;
pub use error::{LoadError, WriteError, WriteErrorKind};
pub use metrics::{LoadMetrics, MetricsSnapshot};
pub use pool::{run_pool, PoolConfig, PoolOutcome, PoolReport, WorkerStatus, WorkerSummary};
pub use populator::DynamoDBPopulator;
pub use service::{AwsTableService, BatchWriteAck, ConnectOptions, ServiceError, TableService};
pub use worker::{run_worker, ExitReason, WorkerContext, WorkerExit};
pub use write::execute_batch;
