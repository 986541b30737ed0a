//! Random item generator for the dynamo-loadtest write path.
//!
//! This crate provides the `ItemGenerator` which synthesizes items that
//! conform to a table's `KeySchema` and packs them into write batches.
//! Each generator owns its RNG, so workers never share random state.
//!
//! # Architecture
//!
//! ```text
//! KeySchema (discovered)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  ItemGenerator  │
//! │                 │
//! │  - schema (Arc) │
//! │  - rng (StdRng) │
//! └────────┬────────┘
//!          │
//!          ▼
//!    Vec<Item> (one write batch)
//! ```
//!
//! # Example
//!
//! ```rust
//! use dynamodb_types::{KeyAttributeType, KeySchema};
//! use loadtest_generator::{ItemGenerator, BATCH_WRITE_SIZE};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(
//!     KeySchema::partition_only("id", KeyAttributeType::String)
//!         .with_sort_key("ts", KeyAttributeType::Number),
//! );
//!
//! let mut generator = ItemGenerator::new(schema, 42);
//! let batch = generator.next_batch(BATCH_WRITE_SIZE).unwrap();
//! assert_eq!(batch.len(), 25);
//! ```
//!
//! # Values
//!
//! - String keys: 20 alphanumeric characters
//! - Number keys: decimal in `[1, 100)`
//! - Binary keys: 256 random bytes

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{ItemGenerator, SynthesisError, BATCH_WRITE_SIZE};
